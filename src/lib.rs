//! # lexibot - vocabulary mini-games for chat
//!
//! lexibot listens to a chat channel for prefixed commands (`!guess latin`,
//! `!hangman greek`, `!addch 你好 hello`) and runs short vocabulary games against a
//! per-language word list. Correct answers earn leaderboard points.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexibot::bot::BotServer;
//! use lexibot::bot::transport::InboundMessage;
//! use lexibot::config::Config;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("lexibot.toml").await?;
//!     let (out_tx, mut out_rx) = mpsc::unbounded_channel();
//!     let (in_tx, in_rx) = mpsc::unbounded_channel();
//!     let server = BotServer::new(config, out_tx);
//!
//!     in_tx.send(InboundMessage::new("alice", "general", "!hi"))?;
//!     drop(in_tx);
//!     server.run(in_rx).await?;
//!     while let Ok(reply) = out_rx.try_recv() {
//!         println!("{}", reply.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bot`] - server loop, command parsing and handlers, the games
//! - [`storage`] - vocabulary and flashcard JSON stores
//! - [`config`] - TOML configuration
//! - [`validation`] - checks on words and translations before they are stored
//! - [`logutil`] - log-safe previews of user text
//!
//! ```text
//! ┌─────────────────┐
//! │   Transport     │ ← console bridge or a platform adapter
//! └─────────────────┘
//!          │ mpsc
//! ┌─────────────────┐
//! │   BotServer     │ ← reply routing, command tasks, games
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Storage       │ ← vocab.json, flashcards.json
//! └─────────────────┘
//! ```

pub mod bot;
pub mod config;
pub mod logutil;
pub mod storage;
pub mod validation;

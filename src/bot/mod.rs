//! # Bot core
//!
//! Everything between the chat transport and the two JSON stores.
//!
//! - [`server`] - [`BotServer`] event loop and the shared [`BotState`]
//! - [`parser`] / [`commands`] - prefixed chat commands and their handlers
//! - [`answer`] - the prompt / wait / grade turn used by Flashcard, Guess and Write
//! - [`games`] - selection policies for each game
//! - [`hangman`] - the Hangman state machine and its round loop
//! - [`replies`] - routing a participant's next message to the game waiting for it
//! - [`leaderboard`] - in-memory win counts
//! - [`colors`], [`calc`], [`content`] - the smaller utility commands
//! - [`transport`] - message types and the console bridge
pub mod answer;
pub mod calc;
pub mod category;
pub mod colors;
pub mod commands;
pub mod content;
pub mod games;
pub mod hangman;
pub mod leaderboard;
pub mod parser;
pub mod replies;
pub mod server;
pub mod transport;

pub use category::Category;
pub use server::{BotServer, BotState};

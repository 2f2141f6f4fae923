//! The bot server: shared state plus the inbound event loop.
//!
//! Routing order for every inbound message:
//!
//! 1. offer it to the [`ReplyHub`]; if a running game is waiting on this author in
//!    this channel, the game takes it and routing stops
//! 2. otherwise parse it as a command; non-commands are ignored
//! 3. run the command in its own task so a game waiting for a reply never blocks
//!    anyone else
use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::answer::GameContext;
use super::colors::ColorRoles;
use super::commands;
use super::leaderboard::Leaderboard;
use super::parser::{Command, CommandParser};
use super::replies::ReplyHub;
use super::transport::{ChannelId, InboundMessage, OutgoingMessage, Responder};
use crate::config::Config;
use crate::logutil::preview;
use crate::storage::{FlashcardStore, VocabularyStore};

/// Everything command handlers share. Cheap to clone.
#[derive(Clone)]
pub struct BotState {
    pub config: Arc<Config>,
    pub vocab: Arc<VocabularyStore>,
    pub flashcards: Arc<FlashcardStore>,
    pub leaderboard: Arc<Leaderboard>,
    pub replies: ReplyHub,
    pub colors: Arc<ColorRoles>,
    prefix: Arc<str>,
    outgoing: mpsc::UnboundedSender<OutgoingMessage>,
}

impl BotState {
    /// Load both stores from the configured data directory.
    pub fn new(config: Config, outgoing: mpsc::UnboundedSender<OutgoingMessage>) -> Self {
        let vocab = VocabularyStore::load(config.vocab_path());
        let flashcards = FlashcardStore::load(config.flashcard_path());
        let colors = ColorRoles::new(&config.colors);
        let prefix: Arc<str> = Arc::from(config.command_prefix());
        BotState {
            config: Arc::new(config),
            vocab: Arc::new(vocab),
            flashcards: Arc::new(flashcards),
            leaderboard: Arc::new(Leaderboard::new()),
            replies: ReplyHub::new(),
            colors: Arc::new(colors),
            prefix,
            outgoing,
        }
    }

    pub fn parser_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn responder(&self, channel: &ChannelId) -> Responder {
        Responder::new(channel.clone(), self.outgoing.clone())
    }

    /// Context for a game started by `msg`: its author plays in its channel.
    pub fn game_context(&self, msg: &InboundMessage) -> GameContext {
        GameContext {
            participant: msg.author.clone(),
            responder: self.responder(&msg.channel),
            replies: self.replies.clone(),
            leaderboard: Arc::clone(&self.leaderboard),
            timeout: self.config.answer_timeout(),
        }
    }
}

pub struct BotServer {
    state: BotState,
    parser: CommandParser,
}

impl BotServer {
    pub fn new(config: Config, outgoing: mpsc::UnboundedSender<OutgoingMessage>) -> Self {
        let state = BotState::new(config, outgoing);
        let parser = CommandParser::new(state.parser_prefix());
        BotServer { state, parser }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Route one inbound message. Returns the handle of the spawned command task, if
    /// the message started one. Must be called inside a tokio runtime.
    pub fn route_event(&self, msg: InboundMessage) -> Option<JoinHandle<()>> {
        let msg = match self.state.replies.deliver(msg) {
            Ok(()) => {
                debug!("reply consumed by a waiting game");
                return None;
            }
            Err(msg) => msg,
        };
        let cmd = self.parser.parse(&msg.text);
        if cmd == Command::Unknown {
            return None;
        }
        debug!(
            "{} in {}: '{}' -> {:?}",
            msg.author,
            msg.channel,
            preview(&msg.text),
            cmd
        );
        let state = self.state.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = commands::execute(&state, &msg, cmd).await {
                commands::report_closed(&msg, &e);
            }
        }))
    }

    /// Serve until the inbound channel closes or ctrl-c arrives.
    pub async fn run(&self, mut inbound: mpsc::UnboundedReceiver<InboundMessage>) -> Result<()> {
        info!(
            "{} started (prefix '{}', answer timeout {}s)",
            self.state.config.bot.name,
            self.state.parser_prefix(),
            self.state.config.bot.answer_timeout_secs
        );
        loop {
            tokio::select! {
                msg = inbound.recv() => {
                    match msg {
                        Some(msg) => {
                            self.route_event(msg);
                        }
                        None => {
                            info!("Inbound channel closed");
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }
        info!("Shutting down; {} game(s) still waiting", self.state.replies.pending());
        Ok(())
    }

    pub fn show_status(&self) -> Result<()> {
        let config = &self.state.config;
        println!("=== lexibot status ===");
        println!("Name: {}", config.bot.name);
        println!("Command prefix: {}", self.state.parser_prefix());
        println!("Answer timeout: {}s", config.bot.answer_timeout_secs);
        println!(
            "Platform token ({}): {}",
            config.bot.token_env,
            if config.token().is_some() { "present" } else { "absent" }
        );
        println!("Vocabulary file: {}", self.state.vocab.path().display());
        for (category, count) in self.state.vocab.counts() {
            println!("  {:<9} {} word(s)", category.display_name(), count);
        }
        println!(
            "Flashcard file: {} ({} card(s))",
            self.state.flashcards.path().display(),
            self.state.flashcards.len()
        );
        Ok(())
    }
}

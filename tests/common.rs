//! Test utilities & fixtures.
//! A bot wired to in-memory channels over a temporary data directory.
#![allow(dead_code)]

use std::time::Duration;

use lexibot::bot::transport::{InboundMessage, OutgoingMessage};
use lexibot::bot::BotServer;
use lexibot::config::Config;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Harness {
    pub server: BotServer,
    pub out: mpsc::UnboundedReceiver<OutgoingMessage>,
    pub tmp: tempfile::TempDir,
}

/// Config pointing at `tmp`, with a short answer deadline.
pub fn test_config(tmp: &tempfile::TempDir, timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = tmp.path().to_string_lossy().to_string();
    config.bot.answer_timeout_secs = timeout_secs;
    config
}

/// Write `vocab_json` as the vocabulary file before the bot loads it.
pub fn harness_with(vocab_json: &str, adjust: impl FnOnce(&mut Config)) -> Harness {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("vocab.json"), vocab_json).unwrap();
    let mut config = test_config(&tmp, 5);
    adjust(&mut config);
    let (tx, out) = mpsc::unbounded_channel();
    let server = BotServer::new(config, tx);
    Harness { server, out, tmp }
}

pub fn harness(vocab_json: &str) -> Harness {
    harness_with(vocab_json, |_| {})
}

impl Harness {
    pub fn say(&self, author: &str, channel: &str, text: &str) -> Option<JoinHandle<()>> {
        self.server.route_event(InboundMessage::new(author, channel, text))
    }

    /// Next outgoing message, failing the test after a few seconds.
    pub async fn next(&mut self) -> OutgoingMessage {
        tokio::time::timeout(Duration::from_secs(5), self.out.recv())
            .await
            .expect("timed out waiting for a bot message")
            .expect("outgoing channel closed")
    }

    pub async fn next_text(&mut self) -> String {
        self.next().await.text
    }

    /// Run a one-shot command to completion and return its single reply.
    pub async fn command(&mut self, author: &str, channel: &str, text: &str) -> String {
        let task = self.say(author, channel, text).expect("not routed as a command");
        task.await.expect("command task panicked");
        self.next_text().await
    }
}

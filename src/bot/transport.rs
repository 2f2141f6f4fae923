//! Message types exchanged with the chat platform, plus the console transport.
//!
//! The bot core never talks to a platform SDK directly. Inbound traffic arrives as
//! [`InboundMessage`] values on an mpsc channel and replies leave as
//! [`OutgoingMessage`] values on another. Whatever owns the platform connection
//! bridges those channels; [`spawn_console`] is the bridge used by `lexibot start`.
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::logutil::preview;

/// Opaque user identity as assigned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Opaque channel identity as assigned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl UserId {
    /// Platform mention markup.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        ChannelId(s.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One chat message seen by the bot.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author: UserId,
    pub channel: ChannelId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(author: impl Into<String>, channel: impl Into<String>, text: impl Into<String>) -> Self {
        InboundMessage {
            author: UserId(author.into()),
            channel: ChannelId(channel.into()),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One message the bot wants posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub channel: ChannelId,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
#[error("outgoing transport closed; message to {0} dropped")]
pub struct TransportClosed(pub ChannelId);

/// Posts replies into the channel a command came from.
#[derive(Debug, Clone)]
pub struct Responder {
    channel: ChannelId,
    tx: mpsc::UnboundedSender<OutgoingMessage>,
}

impl Responder {
    pub fn new(channel: ChannelId, tx: mpsc::UnboundedSender<OutgoingMessage>) -> Self {
        Responder { channel, tx }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn send(&self, text: impl Into<String>) -> Result<(), TransportClosed> {
        let text = text.into();
        debug!("-> {} '{}'", self.channel, preview(&text));
        self.tx
            .send(OutgoingMessage {
                channel: self.channel.clone(),
                text,
            })
            .map_err(|_| TransportClosed(self.channel.clone()))
    }
}

/// Parse a console line of the form `[@user] [#channel] text`.
///
/// The optional prefixes override the defaults for that one line, which lets a single
/// terminal simulate several users and channels. Blank lines yield `None`.
pub fn parse_console_line(line: &str, default_user: &str, default_channel: &str) -> Option<InboundMessage> {
    let mut rest = line.trim();
    let mut user = default_user;
    let mut channel = default_channel;
    for _ in 0..2 {
        if let Some(body) = rest.strip_prefix('@') {
            let (name, tail) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
            if !name.is_empty() {
                user = name;
            }
            rest = tail.trim_start();
        } else if let Some(body) = rest.strip_prefix('#') {
            let (name, tail) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
            if !name.is_empty() {
                channel = name;
            }
            rest = tail.trim_start();
        }
    }
    if rest.is_empty() {
        return None;
    }
    Some(InboundMessage::new(user, channel, rest))
}

/// Bridge stdin/stdout to the bot's channels.
///
/// Returns the reader and writer task handles. The reader ends at EOF, which closes
/// `inbound` and lets the server loop finish.
pub fn spawn_console(
    default_user: String,
    default_channel: String,
    inbound: mpsc::UnboundedSender<InboundMessage>,
    mut outgoing: mpsc::UnboundedReceiver<OutgoingMessage>,
) -> (JoinHandle<()>, JoinHandle<()>) {
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(msg) = parse_console_line(&line, &default_user, &default_channel) {
                        if inbound.send(msg).is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("console: stdin read error: {}", e);
                    break;
                }
            }
        }
        debug!("console reader finished");
    });
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(msg) = outgoing.recv().await {
            let rendered = format!("[{}] {}\n", msg.channel, msg.text);
            if let Err(e) = stdout.write_all(rendered.as_bytes()).await {
                warn!("console: stdout write error: {}", e);
                break;
            }
            let _ = stdout.flush().await;
        }
    });
    (reader, writer)
}

//! # Configuration
//!
//! lexibot reads a single TOML file (`lexibot.toml` by default). Every section has
//! defaults, so a partial file, or none at all when running `lexibot init`, is fine.
//!
//! - [`BotConfig`] - display name, command prefix, answer deadline, token variable
//! - [`StorageConfig`] - data directory and the two JSON file names
//! - [`GamesConfig`] - Hangman lives
//! - [`LoggingConfig`] - level and optional log file
//! - [`ColorsConfig`] - whether the bot may create color roles
//!
//! ```toml
//! [bot]
//! name = "lexibot"
//! command_prefix = "!"
//! answer_timeout_secs = 30
//! token_env = "LEXIBOT_TOKEN"
//!
//! [storage]
//! data_dir = "./data"
//! vocab_file = "vocab.json"
//! flashcard_file = "flashcards.json"
//! max_term_chars = 100
//! ```
//!
//! The platform token itself never lives in the file. `bot.token_env` names the
//! environment variable that holds it; [`Config::token`] reads it on demand.

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::validation::TermRules;

/// Prefixes accepted for `bot.command_prefix`. Anything else falls back to `!`.
pub const ALLOWED_PREFIXES: [&str; 7] = ["!", "^", "+", "$", "/", ">", "?"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
    /// Seconds a game waits for each reply.
    #[serde(default = "default_answer_timeout")]
    pub answer_timeout_secs: u64,
    /// Environment variable holding the platform token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_answer_timeout() -> u64 {
    30
}

fn default_token_env() -> String {
    "LEXIBOT_TOKEN".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            name: "lexibot".to_string(),
            command_prefix: default_prefix(),
            answer_timeout_secs: default_answer_timeout(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    #[serde(default = "default_vocab_file")]
    pub vocab_file: String,
    #[serde(default = "default_flashcard_file")]
    pub flashcard_file: String,
    /// Longest word or translation accepted by the add commands.
    #[serde(default = "default_max_term_chars")]
    pub max_term_chars: usize,
}

fn default_vocab_file() -> String {
    "vocab.json".to_string()
}

fn default_flashcard_file() -> String {
    "flashcards.json".to_string()
}

fn default_max_term_chars() -> usize {
    TermRules::default().max_chars
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: "./data".to_string(),
            vocab_file: default_vocab_file(),
            flashcard_file: default_flashcard_file(),
            max_term_chars: default_max_term_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesConfig {
    #[serde(default = "default_hangman_attempts")]
    pub hangman_attempts: u32,
}

fn default_hangman_attempts() -> u32 {
    crate::bot::hangman::STARTING_ATTEMPTS
}

impl Default for GamesConfig {
    fn default() -> Self {
        GamesConfig {
            hangman_attempts: default_hangman_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// When false, `setcolor` can only hand out roles listed in `existing_roles`.
    #[serde(default = "default_allow_role_creation")]
    pub allow_role_creation: bool,
    #[serde(default)]
    pub existing_roles: Vec<String>,
}

fn default_allow_role_creation() -> bool {
    true
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            allow_role_creation: true,
            existing_roles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub games: GamesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        Self::from_toml(&content).map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    /// A file that exists and fails to parse or validate is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!("{} not found; using built-in defaults", path);
            return Ok(Config::default());
        }
        Self::load(path).await
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to `path`.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.bot.answer_timeout_secs == 0 {
            return Err(anyhow!("bot.answer_timeout_secs must be at least 1"));
        }
        if self.storage.max_term_chars == 0 {
            return Err(anyhow!("storage.max_term_chars must be at least 1"));
        }
        if self.games.hangman_attempts == 0 {
            return Err(anyhow!("games.hangman_attempts must be at least 1"));
        }
        Ok(())
    }

    /// The configured prefix if it is in [`ALLOWED_PREFIXES`], else `!`.
    pub fn command_prefix(&self) -> &str {
        let p = self.bot.command_prefix.trim();
        if ALLOWED_PREFIXES.contains(&p) {
            p
        } else {
            warn!("Invalid command_prefix '{}'; using '!'", self.bot.command_prefix);
            "!"
        }
    }

    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.bot.answer_timeout_secs)
    }

    pub fn vocab_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join(&self.storage.vocab_file)
    }

    pub fn flashcard_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join(&self.storage.flashcard_file)
    }

    pub fn term_rules(&self) -> TermRules {
        TermRules {
            max_chars: self.storage.max_term_chars,
        }
    }

    /// Platform token from the environment, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.bot.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.bot.command_prefix, "!");
        assert_eq!(config.answer_timeout(), Duration::from_secs(30));
        assert_eq!(config.vocab_path(), PathBuf::from("./data").join("vocab.json"));
        assert!(config.colors.allow_role_creation);
        assert_eq!(config.games.hangman_attempts, 6);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config = Config::from_toml(
            "[bot]\nname = \"vocab\"\ncommand_prefix = \"?\"\n[colors]\nallow_role_creation = false\n",
        )
        .unwrap();
        assert_eq!(config.bot.name, "vocab");
        assert_eq!(config.command_prefix(), "?");
        assert_eq!(config.bot.token_env, "LEXIBOT_TOKEN");
        assert!(!config.colors.allow_role_creation);
    }

    #[test]
    fn disallowed_prefix_falls_back() {
        let mut config = Config::default();
        config.bot.command_prefix = "lexi:".into();
        assert_eq!(config.command_prefix(), "!");
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(Config::from_toml("[bot]\nname = \"x\"\nanswer_timeout_secs = 0\n").is_err());
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.storage.data_dir, "./data");
    }

    #[tokio::test]
    async fn broken_file_is_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let typo = dir.path().join("typo.toml");
        std::fs::write(&typo, "[storage\ndata_dir = \"/srv/lexibot\"\n").unwrap();
        let err = Config::load_or_default(typo.to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "[bot]\nname = \"x\"\nanswer_timeout_secs = 0\n").unwrap();
        assert!(Config::load_or_default(invalid.to_str().unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn create_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexibot.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.storage.flashcard_file, "flashcards.json");
        assert_eq!(loaded.logging.level, "info");
    }
}

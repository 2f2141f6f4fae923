//! Hangman: a letter-guessing loop over one word, with six lives.
//!
//! [`HangmanGame`] is the pure state machine; [`play`] drives it over chat, one
//! awaited reply per round. A round that times out ends the game with a reveal and
//! does not cost a life. Hangman never awards leaderboard points.
use log::info;
use std::collections::BTreeSet;

use super::answer::GameContext;
use super::transport::TransportClosed;
use crate::logutil::preview;

pub const STARTING_ATTEMPTS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangmanState {
    InProgress,
    Won,
    Lost,
}

/// What one guess did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Reply was not a single character; nothing changed.
    NotALetter,
    AlreadyGuessed,
    Hit,
    Miss,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct HangmanGame {
    target: String,
    guessed: BTreeSet<char>,
    attempts_remaining: u32,
}

impl HangmanGame {
    pub fn new(target: &str) -> Self {
        Self::with_attempts(target, STARTING_ATTEMPTS)
    }

    pub fn with_attempts(target: &str, attempts: u32) -> Self {
        HangmanGame {
            target: target.to_string(),
            guessed: BTreeSet::new(),
            attempts_remaining: attempts,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Letters still to find, lowercased. Whitespace never needs guessing.
    fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.target
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
    }

    fn all_found(&self) -> bool {
        self.letters().all(|c| self.guessed.contains(&c))
    }

    pub fn state(&self) -> HangmanState {
        if self.all_found() {
            HangmanState::Won
        } else if self.attempts_remaining == 0 {
            HangmanState::Lost
        } else {
            HangmanState::InProgress
        }
    }

    /// Apply one reply. Input is trimmed and lowercased; it must be exactly one character.
    pub fn guess(&mut self, input: &str) -> GuessResult {
        let normalized = input.trim().to_lowercase();
        let mut chars = normalized.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return GuessResult::NotALetter,
        };
        if self.guessed.contains(&letter) {
            return GuessResult::AlreadyGuessed;
        }
        self.guessed.insert(letter);
        if self.letters().any(|c| c == letter) {
            if self.all_found() {
                GuessResult::Won
            } else {
                GuessResult::Hit
            }
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            if self.attempts_remaining == 0 {
                GuessResult::Lost
            } else {
                GuessResult::Miss
            }
        }
    }

    /// Target with unguessed letters as `_`, space separated: `c _ t`.
    pub fn masked(&self) -> String {
        self.target
            .chars()
            .map(|c| {
                let shown = c.is_whitespace()
                    || c.to_lowercase().all(|l| self.guessed.contains(&l));
                if shown {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn guessed_list(&self) -> String {
        self.guessed
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn board(&self) -> String {
        format!(
            "Word: {}\nGuessed letters: {}\nAttempts left: {}",
            self.masked(),
            self.guessed_list(),
            self.attempts_remaining
        )
    }
}

/// Play a full Hangman game over chat and return the final state.
///
/// A timed-out round returns `Lost` with attempts untouched.
pub async fn play(ctx: &GameContext, target: &str, attempts: u32) -> Result<HangmanState, TransportClosed> {
    let mut game = HangmanGame::with_attempts(target, attempts);
    let out = &ctx.responder;
    out.send(format!(
        "Starting Hangman! You have {} incorrect guesses before you lose.",
        attempts
    ))?;

    loop {
        let subscription = ctx.replies.subscribe(&ctx.participant, out.channel());
        out.send(game.board())?;
        let Some(reply) = subscription.recv_within(ctx.timeout).await else {
            out.send(format!("Time's up! The correct word was: **{}**", game.target()))?;
            info!("hangman: {} timed out on '{}'", ctx.participant, preview(game.target()));
            return Ok(HangmanState::Lost);
        };
        match game.guess(&reply.text) {
            GuessResult::NotALetter => out.send("Please guess a single letter.")?,
            GuessResult::AlreadyGuessed => out.send("You've already guessed that letter!")?,
            GuessResult::Hit => out.send("Good guess!")?,
            GuessResult::Miss => out.send("Wrong guess!")?,
            GuessResult::Won => {
                out.send("Good guess!")?;
                out.send(format!(
                    "Congratulations! You've guessed the word: **{}**",
                    game.target()
                ))?;
                info!("hangman: {} won '{}'", ctx.participant, preview(game.target()));
                return Ok(HangmanState::Won);
            }
            GuessResult::Lost => {
                out.send("Wrong guess!")?;
                out.send(format!(
                    "You've run out of attempts! The word was: **{}**",
                    game.target()
                ))?;
                info!("hangman: {} lost '{}'", ctx.participant, preview(game.target()));
                return Ok(HangmanState::Lost);
            }
        }
    }
}

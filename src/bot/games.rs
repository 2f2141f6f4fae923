//! Selection policies for the vocabulary games.
//!
//! Each policy validates the command arguments against the vocabulary, picks the
//! target pair at random and returns a [`GameSession`]. Failures come back as a
//! [`SetupError`] whose `Display` text is the user-facing explanation; a failed setup
//! posts nothing but that message and touches no state.
//!
//! | Game      | Prompt shows  | Expected answer |
//! |-----------|---------------|-----------------|
//! | Flashcard | word          | translation     |
//! | Guess     | translation   | word            |
//! | Write     | filtered word | translation     |
//! | Hangman   | masked word   | letters of word |
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::answer::Question;
use super::category::Category;
use crate::storage::VocabularyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SetupError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a game could not start. The display text is sent to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("Language not supported. Choose from {}.", Category::choice_list())]
    UnsupportedLanguage(String),

    #[error("No vocabulary available for {0}.")]
    EmptyVocabulary(Category),

    #[error("No words found in {category} starting with '{letter}'.")]
    NoWordsWithLetter { category: Category, letter: String },

    #[error("Invalid difficulty level. Choose from easy, medium, or hard.")]
    InvalidDifficulty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Flashcard(Difficulty),
    Guess,
    Write,
    Hangman,
}

/// Transient state of one game invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: Uuid,
    pub kind: GameKind,
    pub category: Category,
    pub word: String,
    pub translation: String,
}

impl GameSession {
    fn new(kind: GameKind, category: Category, word: String, translation: String) -> Self {
        GameSession {
            id: Uuid::new_v4(),
            kind,
            category,
            word,
            translation,
        }
    }

    /// The question for the answer turn. Hangman runs its own loop and has none.
    pub fn question(&self) -> Option<Question> {
        match self.kind {
            GameKind::Flashcard(difficulty) => Some(Question {
                prompt: format!(
                    "Flashcard ({}, {}): **{}** - What is the meaning?",
                    self.category, difficulty, self.word
                ),
                expected: self.translation.clone(),
                answer_noun: "answer",
            }),
            GameKind::Guess => Some(Question {
                prompt: format!(
                    "Guess the word in **{}**: **{}**",
                    self.category, self.translation
                ),
                expected: self.word.clone(),
                answer_noun: "word",
            }),
            GameKind::Write => Some(Question {
                prompt: format!("Write the meaning of the word: **{}**", self.word),
                expected: self.translation.clone(),
                answer_noun: "meaning",
            }),
            GameKind::Hangman => None,
        }
    }
}

pub fn parse_category(lang: &str) -> Result<Category, SetupError> {
    Category::from_tag(lang).ok_or_else(|| SetupError::UnsupportedLanguage(lang.to_string()))
}

fn random_pair(vocab: &VocabularyStore, category: Category) -> Result<(String, String), SetupError> {
    vocab
        .random_entry(category)
        .ok_or(SetupError::EmptyVocabulary(category))
}

/// Flashcard: random category, then a random pair inside it.
///
/// The category is drawn before looking at its contents, so an empty category fails
/// the round even when others have words.
pub fn pick_flashcard(vocab: &VocabularyStore, difficulty: Option<&str>) -> Result<GameSession, SetupError> {
    let difficulty = match difficulty {
        Some(raw) => raw.parse::<Difficulty>()?,
        None => Difficulty::default(),
    };
    let category = *Category::ALL
        .choose(&mut rand::thread_rng())
        .unwrap_or(&Category::Chinese);
    let (word, translation) = random_pair(vocab, category)?;
    Ok(GameSession::new(
        GameKind::Flashcard(difficulty),
        category,
        word,
        translation,
    ))
}

/// Guess: show a translation from the chosen category, expect the word.
pub fn pick_guess(vocab: &VocabularyStore, lang: &str) -> Result<GameSession, SetupError> {
    let category = parse_category(lang)?;
    let (word, translation) = random_pair(vocab, category)?;
    Ok(GameSession::new(GameKind::Guess, category, word, translation))
}

/// Words of `category` starting with `letter`, case-insensitively, sorted.
pub fn write_candidates(vocab: &VocabularyStore, category: Category, letter: &str) -> Vec<(String, String)> {
    vocab.words_starting_with(category, letter)
}

/// Write: pick among words starting with `letter`, expect the translation.
pub fn pick_write(vocab: &VocabularyStore, lang: &str, letter: &str) -> Result<GameSession, SetupError> {
    let category = parse_category(lang)?;
    let letter = letter.trim().to_lowercase();
    let candidates = write_candidates(vocab, category, &letter);
    let (word, translation) = candidates
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(SetupError::NoWordsWithLetter { category, letter })?;
    Ok(GameSession::new(GameKind::Write, category, word, translation))
}

/// Hangman: a random word from the chosen category.
pub fn pick_hangman(vocab: &VocabularyStore, lang: &str) -> Result<GameSession, SetupError> {
    let category = parse_category(lang)?;
    let (word, translation) = random_pair(vocab, category)?;
    Ok(GameSession::new(GameKind::Hangman, category, word, translation))
}

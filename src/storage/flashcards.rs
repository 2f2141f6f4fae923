//! User-created flashcards backed by `flashcards.json` (word → translation).
use log::info;
use rand::seq::IteratorRandom;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{lock, read_json_document, write_json_atomic, StoreError};
use crate::logutil::preview;

pub struct FlashcardStore {
    path: PathBuf,
    cards: Mutex<HashMap<String, String>>,
}

impl FlashcardStore {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let cards: HashMap<String, String> = read_json_document(&path, "flashcards");
        FlashcardStore {
            path,
            cards: Mutex::new(cards),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let guard = lock(&self.cards);
        write_json_atomic(&self.path, &*guard)?;
        info!("flashcards saved to {}", self.path.display());
        Ok(())
    }

    /// Insert or overwrite a card, persisting before returning (rolled back on failure).
    pub fn add_card(&self, word: &str, translation: &str) -> Result<Option<String>, StoreError> {
        let mut guard = lock(&self.cards);
        let previous = guard.insert(word.to_string(), translation.to_string());
        if let Err(e) = write_json_atomic(&self.path, &*guard) {
            match &previous {
                Some(p) => {
                    guard.insert(word.to_string(), p.clone());
                }
                None => {
                    guard.remove(word);
                }
            }
            return Err(e);
        }
        info!(
            "flashcards: '{}' -> '{}' saved",
            preview(word),
            preview(translation)
        );
        Ok(previous)
    }

    /// All cards sorted by word.
    pub fn list(&self) -> Vec<(String, String)> {
        let guard = lock(&self.cards);
        let mut out: Vec<(String, String)> = guard
            .iter()
            .map(|(w, t)| (w.clone(), t.clone()))
            .collect();
        out.sort();
        out
    }

    pub fn random_card(&self) -> Option<(String, String)> {
        let guard = lock(&self.cards);
        guard
            .iter()
            .choose(&mut rand::thread_rng())
            .map(|(w, t)| (w.clone(), t.clone()))
    }

    pub fn len(&self) -> usize {
        lock(&self.cards).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        lock(&self.cards).clone()
    }
}

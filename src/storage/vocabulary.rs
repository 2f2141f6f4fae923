//! Per-category vocabulary store backed by `vocab.json`.
//!
//! The in-memory [`Vocabulary`] always carries every [`Category`] key, even when a
//! category has no words yet. Unknown keys found on disk are dropped with a warning.
use log::{info, warn};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{lock, read_json_document, write_json_atomic, StoreError};
use crate::bot::category::Category;
use crate::logutil::preview;

/// word → translation
pub type WordMap = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    categories: BTreeMap<Category, WordMap>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            categories: Category::ALL
                .iter()
                .map(|c| (*c, WordMap::new()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw: HashMap<String, WordMap> = HashMap::deserialize(deserializer)?;
        let mut vocab = Vocabulary::default();
        for cat in Category::ALL {
            if let Some(words) = raw.remove(cat.tag()) {
                vocab.categories.insert(cat, words);
            }
        }
        for unknown in raw.keys() {
            warn!("vocabulary: ignoring unknown category '{}'", preview(unknown));
        }
        Ok(vocab)
    }
}

impl Vocabulary {
    pub fn words(&self, category: Category) -> &WordMap {
        // Every key is present by construction; the fallback keeps this total.
        static EMPTY: std::sync::OnceLock<WordMap> = std::sync::OnceLock::new();
        self.categories
            .get(&category)
            .unwrap_or_else(|| EMPTY.get_or_init(WordMap::new))
    }

    pub fn insert(&mut self, category: Category, word: String, translation: String) -> Option<String> {
        self.categories
            .entry(category)
            .or_default()
            .insert(word, translation)
    }

    fn restore(&mut self, category: Category, word: &str, previous: Option<String>) {
        let words = self.categories.entry(category).or_default();
        match previous {
            Some(p) => {
                words.insert(word.to_string(), p);
            }
            None => {
                words.remove(word);
            }
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }
}

/// Vocabulary with write-through persistence.
pub struct VocabularyStore {
    path: PathBuf,
    vocab: Mutex<Vocabulary>,
}

impl VocabularyStore {
    /// Load from `path`; a missing or corrupt file yields empty categories.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let vocab: Vocabulary = read_json_document(&path, "vocabulary");
        VocabularyStore {
            path,
            vocab: Mutex::new(vocab),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the whole vocabulary.
    pub fn save(&self) -> Result<(), StoreError> {
        let guard = lock(&self.vocab);
        write_json_atomic(&self.path, &*guard)?;
        info!("vocabulary saved to {}", self.path.display());
        Ok(())
    }

    /// Insert or overwrite `word` and persist before returning.
    ///
    /// Returns the translation that was replaced, if any. When the save fails the
    /// in-memory change is undone and the error is returned.
    pub fn add_word(
        &self,
        category: Category,
        word: &str,
        translation: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut guard = lock(&self.vocab);
        let previous = guard.insert(category, word.to_string(), translation.to_string());
        if let Err(e) = write_json_atomic(&self.path, &*guard) {
            guard.restore(category, word, previous);
            return Err(e);
        }
        info!(
            "vocabulary: {} '{}' -> '{}' saved",
            category.tag(),
            preview(word),
            preview(translation)
        );
        Ok(previous)
    }

    pub fn snapshot(&self) -> Vocabulary {
        lock(&self.vocab).clone()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        lock(&self.vocab).words(category).is_empty()
    }

    pub fn translation_of(&self, category: Category, word: &str) -> Option<String> {
        lock(&self.vocab).words(category).get(word).cloned()
    }

    /// Uniformly random (word, translation) from `category`.
    pub fn random_entry(&self, category: Category) -> Option<(String, String)> {
        let guard = lock(&self.vocab);
        let mut rng = rand::thread_rng();
        guard
            .words(category)
            .iter()
            .choose(&mut rng)
            .map(|(w, t)| (w.clone(), t.clone()))
    }

    /// Entries whose word starts with `prefix`, compared case-insensitively.
    pub fn words_starting_with(&self, category: Category, prefix: &str) -> Vec<(String, String)> {
        let prefix = prefix.trim().to_lowercase();
        let guard = lock(&self.vocab);
        let mut out: Vec<(String, String)> = guard
            .words(category)
            .iter()
            .filter(|(w, _)| w.to_lowercase().starts_with(&prefix))
            .map(|(w, t)| (w.clone(), t.clone()))
            .collect();
        out.sort();
        out
    }

    /// (category, word count) for every category in display order.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        let guard = lock(&self.vocab);
        Category::ALL
            .iter()
            .map(|c| (*c, guard.words(*c).len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_populates_every_category() {
        let tmp = tempfile::tempdir().unwrap();
        let store = VocabularyStore::load(tmp.path().join("vocab.json"));
        let snap = store.snapshot();
        for cat in Category::ALL {
            assert!(snap.words(cat).is_empty());
        }
        assert_eq!(snap.categories().count(), Category::ALL.len());
    }

    #[test]
    fn unknown_keys_are_dropped_and_missing_ones_filled() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vocab.json");
        std::fs::write(
            &path,
            r#"{"latin": {"Amor": "Love"}, "klingon": {"Qapla'": "Success"}}"#,
        )
        .unwrap();
        let store = VocabularyStore::load(&path);
        assert_eq!(
            store.translation_of(Category::Latin, "Amor").as_deref(),
            Some("Love")
        );
        assert!(store.is_empty(Category::Norse));
        assert_eq!(store.snapshot().categories().count(), 5);
    }

    #[test]
    fn add_word_overwrites_and_reports_previous() {
        let tmp = tempfile::tempdir().unwrap();
        let store = VocabularyStore::load(tmp.path().join("vocab.json"));
        assert_eq!(store.add_word(Category::Greek, "λόγος", "word").unwrap(), None);
        assert_eq!(
            store
                .add_word(Category::Greek, "λόγος", "reason")
                .unwrap()
                .as_deref(),
            Some("word")
        );
        let reloaded = VocabularyStore::load(store.path());
        assert_eq!(
            reloaded.translation_of(Category::Greek, "λόγος").as_deref(),
            Some("reason")
        );
    }

    #[test]
    fn save_then_load_preserves_every_category() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vocab.json");
        std::fs::write(
            &path,
            r#"{
                "chinese": {"你好": "hello", "学习": "to study"},
                "greek": {"λόγος": "word", "Ἀθῆναι": "Athens"},
                "latin": {"Cæsar": "Caesar", "veritas": "truth"},
                "sanskrit": {"नमस्ते": "greetings", "धर्म": "duty"},
                "norse": {"ᚠ": "wealth", "ᚢᚱ": "aurochs \"ur\""}
            }"#,
        )
        .unwrap();
        let store = VocabularyStore::load(&path);
        std::fs::remove_file(&path).unwrap();

        store.save().unwrap();
        let reloaded = VocabularyStore::load(&path);
        assert_eq!(reloaded.snapshot(), store.snapshot());
        for (category, count) in reloaded.counts() {
            assert_eq!(count, 2, "{} lost words", category);
        }
        assert_eq!(
            reloaded.translation_of(Category::Norse, "ᚢᚱ").as_deref(),
            Some("aurochs \"ur\"")
        );
    }

    #[test]
    fn failed_save_rolls_back_in_memory_change() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = VocabularyStore::load(blocker.join("vocab.json"));
        assert!(store.add_word(Category::Latin, "Aqua", "Water").is_err());
        assert!(store.is_empty(Category::Latin));
    }

    #[test]
    fn prefix_filter_is_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let store = VocabularyStore::load(tmp.path().join("vocab.json"));
        store.add_word(Category::Latin, "Amor", "Love").unwrap();
        store.add_word(Category::Latin, "Agua", "Water").unwrap();
        store.add_word(Category::Latin, "Bellum", "War").unwrap();
        let words: Vec<String> = store
            .words_starting_with(Category::Latin, "a")
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        assert_eq!(words, vec!["Agua".to_string(), "Amor".to_string()]);
        assert!(store.words_starting_with(Category::Latin, "z").is_empty());
    }
}

//! # Storage Module - Flat JSON Stores
//!
//! The bot persists exactly two documents, each loaded whole at startup and
//! rewritten whole on every mutation (write-through):
//!
//! ```text
//! data/
//! ├── vocab.json       ← category → (word → translation)
//! └── flashcards.json  ← word → translation
//! ```
//!
//! - [`vocabulary::VocabularyStore`] - per-category vocabulary used by the games
//! - [`flashcards::FlashcardStore`] - user-created flashcards
//!
//! ## Write discipline
//!
//! Saves go through [`write_json_atomic`]: serialize, write a temp file in the same
//! directory, fsync, then rename over the destination while holding an exclusive
//! fs2 lock on a sidecar `.lock` file. Readers therefore see either the old or the
//! new document, never a torn one.
//!
//! ## Load discipline
//!
//! [`read_json_document`] never fails startup. A missing file yields the empty
//! structure with a warning; an unreadable or corrupt file is logged, moved aside to
//! `<name>.corrupt`, and also yields the empty structure.

pub mod flashcards;
pub mod vocabulary;

pub use flashcards::FlashcardStore;
pub use vocabulary::{Vocabulary, VocabularyStore, WordMap};

use fs2::FileExt;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors surfaced by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure while persisting (disk full, permissions, ...).
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Lock a store mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pretty JSON with four-space indentation and UTF-8 kept as-is.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Read a whole JSON document, falling back to `T::default()` when it is absent or bad.
///
/// `label` names the store in log lines ("vocabulary", "flashcards").
pub fn read_json_document<T>(path: &Path, label: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "{} file {} not found; starting with an empty store",
                label,
                path.display()
            );
            return T::default();
        }
        Err(e) => {
            error!(
                "{} file {} unreadable ({}); starting with an empty store",
                label,
                path.display(),
                e
            );
            return T::default();
        }
    };
    // Guard against any accidental leading NULs
    let cleaned = data.trim_start_matches('\0');
    if cleaned.trim().is_empty() {
        warn!("{} file {} is empty", label, path.display());
        return T::default();
    }
    match serde_json::from_str(cleaned) {
        Ok(doc) => {
            info!("{} loaded from {}", label, path.display());
            doc
        }
        Err(e) => {
            error!(
                "{} file {} is corrupt ({}); starting with an empty store",
                label,
                path.display(),
                e
            );
            quarantine(path);
            T::default()
        }
    }
}

/// Move a corrupt document aside so the next save does not destroy it.
fn quarantine(path: &Path) {
    let mut target = path.as_os_str().to_owned();
    target.push(".corrupt");
    let target = PathBuf::from(target);
    match fs::rename(path, &target) {
        Ok(()) => warn!("moved corrupt file to {}", target.display()),
        Err(e) => warn!("could not move corrupt file {}: {}", path.display(), e),
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut p = path.as_os_str().to_owned();
    p.push(suffix);
    PathBuf::from(p)
}

/// Atomically replace `path` with the JSON serialization of `value`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = to_pretty_json(value)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    // Step 1: exclusive lock on a sidecar so concurrent writers (other processes) serialize
    let lock_path = sidecar(path, ".lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| StoreError::io(&lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| StoreError::io(&lock_path, e))?;

    // Step 2: unique temp file in the same directory, written and fsynced
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("store.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                let written = tmp
                    .write_all(&content)
                    .and_then(|_| tmp.flush())
                    .and_then(|_| tmp.sync_all());
                if let Err(e) = written {
                    let _ = fs::remove_file(&candidate);
                    return Err(StoreError::io(&candidate, e));
                }
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => return Err(StoreError::io(&candidate, e)),
        }
    };

    // Step 3: atomically replace the destination
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::io(path, e));
    }

    // Step 4: fsync the directory so the rename survives a crash (best-effort)
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }

    let _ = lock_file.unlock();
    Ok(())
}

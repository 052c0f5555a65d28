//! Store Module - persistence contracts and the SQLite implementation
//!
//! The engine only ever talks to two small traits: [`WordStore`] for
//! loading and write-through saving of records, and [`Clock`] for the
//! current calendar date. [`SqliteStore`] is the shipped implementation;
//! [`MemoryStore`] backs tests and embedders that bring their own
//! persistence.

mod import;
mod sqlite;

pub use import::{import_csv, ImportOutcome};
pub use sqlite::SqliteStore;

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::sync::Mutex;

use crate::word::WordRecord;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Store error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed import source
    #[error("import error: {0}")]
    Import(String),
    /// CSV parsing error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Initialization error
    #[error("initialization error: {0}")]
    Init(String),
}

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// CONTRACTS
// ============================================================================

/// Load-all / save-one persistence contract the engine writes through.
///
/// `save` is an upsert keyed by the word's `text`; it runs once per accepted
/// answer, so a failure is reported to the caller rather than swallowed.
pub trait WordStore {
    /// Load every stored record.
    fn load_all(&self) -> Result<Vec<WordRecord>>;
    /// Insert or update one record, keyed by its `text`.
    fn save(&self, word: &WordRecord) -> Result<()>;
}

/// Source of the current calendar date.
///
/// Scheduling works in local calendar dates; there is no time of day and no
/// time zone parameter. Injecting the clock keeps every transition
/// reproducible in tests.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Insertion-ordered in-memory store.
///
/// Useful in tests and for embedders that persist elsewhere; mirrors the
/// upsert semantics of [`SqliteStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: Mutex<IndexMap<String, WordRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `words`.
    pub fn with_words(words: impl IntoIterator<Item = WordRecord>) -> Result<Self> {
        let store = Self::new();
        for word in words {
            store.save(&word)?;
        }
        Ok(store)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, IndexMap<String, WordRecord>>> {
        self.words
            .lock()
            .map_err(|_| StoreError::Init("word map lock poisoned".into()))
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.guard()?.len())
    }

    /// Fetch one record by its text.
    pub fn get(&self, text: &str) -> Result<Option<WordRecord>> {
        Ok(self.guard()?.get(text).cloned())
    }
}

impl WordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<WordRecord>> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn save(&self, word: &WordRecord) -> Result<()> {
        self.guard()?.insert(word.text.clone(), word.clone());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

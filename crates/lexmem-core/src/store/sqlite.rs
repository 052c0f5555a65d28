//! SQLite word store
//!
//! Write-through persistence for [`WordRecord`]s: one row per word, keyed
//! by the word text, dates stored as ISO-8601 text.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{Result, StoreError, WordStore};
use crate::word::WordRecord;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS words (
    text          TEXT PRIMARY KEY,
    meaning       TEXT NOT NULL,
    example       TEXT NOT NULL DEFAULT '',
    repetitions   INTEGER NOT NULL DEFAULT 0,
    interval      INTEGER NOT NULL DEFAULT 1,
    ease_factor   REAL NOT NULL DEFAULT 2.5,
    next_review   TEXT NOT NULL,
    last_reviewed TEXT,
    created_at    TEXT NOT NULL,
    forget_risk   REAL NOT NULL DEFAULT 1.0
);
CREATE INDEX IF NOT EXISTS idx_words_next_review ON words(next_review);
";

/// SQLite-backed [`WordStore`]
///
/// All methods take `&self`; the connection lives behind a mutex so the
/// store can be shared by reference with a running session.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at `db_path`, or at the platform data
    /// directory when `None`.
    pub fn open(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("com", "lexmem", "lexmem").ok_or_else(|| {
                    StoreError::Init("could not determine project directories".to_string())
                })?;
                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                data_dir.join("words.db")
            }
        };

        let conn = Connection::open(&path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;
        info!(path = %path.display(), "word store opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn guard(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Init("connection lock poisoned".into()))
    }

    /// Fetch one record by its text.
    pub fn get(&self, text: &str) -> Result<Option<WordRecord>> {
        let conn = self.guard()?;
        let word = conn
            .query_row(
                "SELECT text, meaning, example, repetitions, interval, ease_factor,
                        next_review, last_reviewed, created_at, forget_risk
                 FROM words WHERE text = ?1",
                params![text],
                row_to_word,
            )
            .optional()?;
        Ok(word)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let conn = self.guard()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Delete one record. Returns whether a row was removed.
    pub fn delete(&self, text: &str) -> Result<bool> {
        let conn = self.guard()?;
        let n = conn.execute("DELETE FROM words WHERE text = ?1", params![text])?;
        Ok(n > 0)
    }
}

impl WordStore for SqliteStore {
    fn load_all(&self) -> Result<Vec<WordRecord>> {
        let conn = self.guard()?;
        let mut stmt = conn.prepare(
            "SELECT text, meaning, example, repetitions, interval, ease_factor,
                    next_review, last_reviewed, created_at, forget_risk
             FROM words ORDER BY rowid",
        )?;
        let words = stmt
            .query_map([], row_to_word)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = words.len(), "records loaded");
        Ok(words)
    }

    fn save(&self, word: &WordRecord) -> Result<()> {
        let conn = self.guard()?;
        conn.execute(
            "INSERT INTO words (text, meaning, example, repetitions, interval, ease_factor,
                                next_review, last_reviewed, created_at, forget_risk)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(text) DO UPDATE SET
                meaning = excluded.meaning,
                example = excluded.example,
                repetitions = excluded.repetitions,
                interval = excluded.interval,
                ease_factor = excluded.ease_factor,
                next_review = excluded.next_review,
                last_reviewed = excluded.last_reviewed,
                created_at = excluded.created_at,
                forget_risk = excluded.forget_risk",
            params![
                word.text,
                word.meaning,
                word.example,
                word.repetitions,
                word.interval,
                word.ease_factor,
                word.next_review,
                word.last_reviewed,
                word.created_at,
                word.forget_risk,
            ],
        )?;
        Ok(())
    }
}

fn row_to_word(row: &rusqlite::Row<'_>) -> rusqlite::Result<WordRecord> {
    Ok(WordRecord {
        text: row.get(0)?,
        meaning: row.get(1)?,
        example: row.get(2)?,
        repetitions: row.get(3)?,
        interval: row.get(4)?,
        ease_factor: row.get(5)?,
        next_review: row.get(6)?,
        last_reviewed: row.get(7)?,
        created_at: row.get(8)?,
        forget_risk: row.get(9)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

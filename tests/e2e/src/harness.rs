//! Test Store Manager
//!
//! Provides isolated word stores for testing:
//! - Temporary SQLite databases that are automatically cleaned up
//! - Pre-seeded stores with fixture records
//! - Concurrent test isolation (one database per manager)

use lexmem_core::{SqliteStore, WordRecord, WordStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Manager for test stores
///
/// Creates an isolated SQLite database per test to prevent interference.
/// The database file is deleted when the manager is dropped.
pub struct TestStoreManager {
    /// The store under test
    pub store: SqliteStore,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestStoreManager {
    /// Create a new empty test store in a temporary directory.
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let db_path = temp_dir.path().join("test_words.db");
        let store =
            SqliteStore::open(Some(db_path.clone())).expect("failed to create test store");
        Self {
            store,
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Create a test store pre-seeded with `records`.
    pub fn seeded(records: impl IntoIterator<Item = WordRecord>) -> Self {
        let manager = Self::new_temp();
        for record in records {
            manager.store.save(&record).expect("failed to seed record");
        }
        manager
    }

    /// Reload every record from disk.
    pub fn reload(&self) -> Vec<WordRecord> {
        self.store.load_all().expect("failed to load records")
    }

    /// Fetch one record by text, panicking if absent.
    pub fn fetch(&self, text: &str) -> WordRecord {
        self.store
            .get(text)
            .expect("failed to query record")
            .unwrap_or_else(|| panic!("record '{text}' not found"))
    }
}

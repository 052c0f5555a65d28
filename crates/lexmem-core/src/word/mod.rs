//! Word module - The record entity and its derived state
//!
//! A [`WordRecord`] is the value the whole engine revolves around: the
//! scheduler rewrites its SM2 state, the session planner selects over it,
//! and the store persists it keyed by `text`.

mod record;

pub use record::{WordRecord, INITIAL_EASE_FACTOR};

use serde::{Deserialize, Serialize};

// ============================================================================
// ERRORS
// ============================================================================

/// Rejection reasons when constructing a [`WordRecord`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    /// The word text was empty after trimming
    #[error("word text must not be empty")]
    EmptyText,
    /// The meaning was empty after trimming
    #[error("meaning must not be empty for '{0}'")]
    EmptyMeaning(String),
}

// ============================================================================
// STATUS
// ============================================================================

/// Coarse learning progress of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    /// Never completed a review cycle
    New,
    /// Reviewed but not yet settled
    Learning,
    /// Three or more repetitions at full ease
    Mastered,
}

impl WordStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WordStatus::New => "new",
            WordStatus::Learning => "learning",
            WordStatus::Mastered => "mastered",
        }
    }
}

impl std::fmt::Display for WordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

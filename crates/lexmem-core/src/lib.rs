//! # Lexmem Core
//!
//! Vocabulary review engine: an SM2-style spaced-repetition scheduler, a
//! forgetting-risk estimator, a free-text answer grader, and a daily
//! session planner with retry and replay handling.
//!
//! The engine works on plain [`WordRecord`] values and two small
//! environment contracts: a [`WordStore`] it writes through after every
//! accepted answer, and a [`Clock`] supplying the current calendar date.
//! Everything is synchronous; a session owns its queue for the whole
//! sitting.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lexmem_core::{
//!     QuizMode, Session, SqliteStore, StudyConfig, SystemClock, Clock, WordStore,
//! };
//!
//! let store = SqliteStore::open(None)?;
//! let today = SystemClock.today();
//!
//! let records = store.load_all()?;
//! let mut session = Session::build(&records, &StudyConfig::default(), QuizMode::Meaning, today);
//!
//! while let Some(word) = session.current() {
//!     let answer = prompt(&word.text);
//!     let outcome = session.submit(&answer, &store)?;
//!     if outcome.map(|o| o.advanced).unwrap_or(false) {
//!         session.advance();
//!     }
//! }
//! let report = session.summary();
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod evaluate;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;
pub mod word;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Word records
pub use word::{WordError, WordRecord, WordStatus, INITIAL_EASE_FACTOR};

// Answer grading
pub use evaluate::{evaluate, evaluate_meaning, evaluate_spelling, QuizMode};

// SM2 scheduling
pub use sm2::{Sm2Scheduler, DEFAULT_RISK_THRESHOLD, MAX_EASE_FACTOR, MIN_EASE_FACTOR};

// Session planning
pub use session::{
    due_words, new_words, order_records, Feedback, NoopPacer, OrderMode, Pacer, Session,
    SessionStatus, SessionSummary, SleepPacer, StudyConfig, SubmitOutcome, FEEDBACK_PAUSE,
};

// Persistence contracts and stores
pub use store::{
    import_csv, Clock, FixedClock, ImportOutcome, MemoryStore, SqliteStore, StoreError,
    SystemClock, WordStore,
};

// Statistics
pub use stats::{learning_stats, LearningStats};

//! SM2 Module - spaced-repetition interval scheduling
//!
//! An SM2-style rule: each graded answer rewrites a word's repetitions,
//! ease factor, interval, and next review date. Failures (quality below 3)
//! reset the word to a one-day interval.

mod scheduler;

pub use scheduler::{
    Sm2Scheduler, DEFAULT_RISK_THRESHOLD, MAX_EASE_FACTOR, MIN_EASE_FACTOR,
};

//! Test Data Factory
//!
//! Utilities for generating realistic word records:
//! - Fresh words, due words, and high-risk words on a fixed calendar
//! - Batch generation for larger scenarios

use chrono::{Duration, NaiveDate};
use lexmem_core::WordRecord;

/// The fixed "today" every e2e scenario runs on.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

/// A brand-new word created today.
pub fn fresh_word(text: &str, meaning: &str) -> WordRecord {
    WordRecord::new(text, meaning, "", today()).expect("valid word")
}

/// A reviewed word due on or before today.
pub fn due_word(text: &str, repetitions: u32, days_overdue: i64) -> WordRecord {
    let mut word = fresh_word(text, "释义");
    word.repetitions = repetitions;
    word.interval = 3;
    word.last_reviewed = Some(today() - Duration::days(days_overdue + 3));
    word.next_review = today() - Duration::days(days_overdue);
    word
}

/// A reviewed word scheduled ahead of today but reviewed long enough ago
/// to sit above the high-risk threshold.
pub fn risky_word(text: &str) -> WordRecord {
    let mut word = fresh_word(text, "释义");
    word.repetitions = 1;
    word.interval = 30;
    word.last_reviewed = Some(today() - Duration::days(10));
    word.next_review = today() + Duration::days(20);
    word
}

/// A batch of fresh words named `prefix-00` through `prefix-NN`.
pub fn fresh_batch(prefix: &str, count: usize) -> Vec<WordRecord> {
    (0..count)
        .map(|i| fresh_word(&format!("{prefix}-{i:02}"), &format!("释义{i}")))
        .collect()
}

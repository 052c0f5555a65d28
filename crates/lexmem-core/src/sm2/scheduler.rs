//! SM2 review scheduler
//!
//! Consumes a quality grade for one answer and produces the word's next
//! schedule. The scheduler never persists anything; callers save the
//! returned record.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::word::WordRecord;

/// Lower bound of the ease factor.
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Upper bound of the ease factor, equal to the starting value.
pub const MAX_EASE_FACTOR: f64 = 2.5;
/// Forgetting-risk threshold used when no caller-specific one applies.
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.7;

/// Grade at or above which an answer counts as a pass for scheduling.
const PASS_QUALITY: u8 = 3;

/// Ease-factor adjustment for a quality grade.
///
/// Grades outside 0..=5 are accepted and leave the ease factor untouched;
/// they still count as pass or fail against the threshold.
fn ease_delta(quality: u8) -> f64 {
    match quality {
        0 => -0.8,
        1 => -0.5,
        2 => -0.2,
        3 => 0.0,
        4 => 0.1,
        5 => 0.2,
        _ => 0.0,
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// SM2-style spaced-repetition scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Scheduler;

impl Sm2Scheduler {
    /// Create a scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Apply one graded answer to a word and return its updated schedule.
    ///
    /// Quality below 3 resets the word: interval back to one day and
    /// repetitions to zero. Passing grades step through the 1-day and 3-day
    /// warm-up intervals, then grow the previous interval by the updated
    /// ease factor (truncated to whole days).
    pub fn update(&self, mut word: WordRecord, quality: u8, today: NaiveDate) -> WordRecord {
        word.last_reviewed = Some(today);
        word.repetitions += 1;

        word.ease_factor =
            (word.ease_factor + ease_delta(quality)).clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR);

        if quality < PASS_QUALITY {
            word.interval = 1;
            word.repetitions = 0;
        } else {
            word.interval = match word.repetitions {
                1 => 1,
                2 => 3,
                _ => (word.interval as f64 * word.ease_factor) as i64,
            };
        }

        word.next_review = today + Duration::days(word.interval);
        word.refresh_risk(today);

        debug!(
            word = %word.text,
            quality,
            repetitions = word.repetitions,
            interval = word.interval,
            ease = word.ease_factor,
            "review applied"
        );
        word
    }

    /// Words at elevated risk of being forgotten before their next review.
    ///
    /// Filters to reviewed words whose recomputed risk reaches `threshold`
    /// and whose `next_review` is still in the future; words already due
    /// belong to the review queue instead. Sorted descending by risk.
    pub fn high_risk_words(
        &self,
        words: &[WordRecord],
        threshold: f64,
        today: NaiveDate,
    ) -> Vec<WordRecord> {
        let mut at_risk: Vec<WordRecord> = words
            .iter()
            .filter(|w| w.repetitions > 0)
            .map(|w| {
                let mut w = w.clone();
                w.refresh_risk(today);
                w
            })
            .filter(|w| w.forget_risk >= threshold && w.next_review > today)
            .collect();
        at_risk.sort_by(|a, b| b.forget_risk.total_cmp(&a.forget_risk));
        at_risk
    }
}

// ============================================================================
// TESTS
// ============================================================================

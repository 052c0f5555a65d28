//! Learning statistics over the full record set

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sm2::Sm2Scheduler;
use crate::word::{WordRecord, WordStatus};

/// Risk threshold counted as "high" in the overview, matching the session
/// planner's review-pool cutoff.
const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Aggregate statistics about the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    /// Total stored words
    pub total_words: usize,
    /// Words at three or more repetitions with full ease
    pub mastered: usize,
    /// Reviewed words still below mastery
    pub learning: usize,
    /// Words never reviewed
    pub new_words: usize,
    /// Reviewed words due on or before today
    pub due_today: usize,
    /// Words whose last review happened today
    pub reviewed_today: usize,
    /// Mean ease factor over reviewed words, rounded to two decimals
    pub avg_ease_factor: f64,
    /// Sum of repetition counters across all words
    pub total_reviews: u64,
    /// Words reviewed at least once
    pub reviewed_words: usize,
    /// Reviewed, not-yet-due words above the high-risk threshold
    pub high_risk_words: usize,
}

/// Compute collection statistics as of `today`.
pub fn learning_stats(records: &[WordRecord], today: NaiveDate) -> LearningStats {
    let mut stats = LearningStats {
        total_words: records.len(),
        ..LearningStats::default()
    };
    if records.is_empty() {
        return stats;
    }

    let mut ease_sum = 0.0;
    for word in records {
        stats.total_reviews += u64::from(word.repetitions);

        match word.status() {
            WordStatus::New => stats.new_words += 1,
            WordStatus::Learning => {
                stats.learning += 1;
                stats.reviewed_words += 1;
                ease_sum += word.ease_factor;
            }
            WordStatus::Mastered => {
                stats.mastered += 1;
                stats.reviewed_words += 1;
                ease_sum += word.ease_factor;
            }
        }

        if word.is_due(today) {
            stats.due_today += 1;
        }
        if word.repetitions > 0 && word.last_reviewed == Some(today) {
            stats.reviewed_today += 1;
        }
    }

    if stats.reviewed_words > 0 {
        let avg = ease_sum / stats.reviewed_words as f64;
        stats.avg_ease_factor = (avg * 100.0).round() / 100.0;
    }

    stats.high_risk_words = Sm2Scheduler::new()
        .high_risk_words(records, HIGH_RISK_THRESHOLD, today)
        .len();

    stats
}

// ============================================================================
// TESTS
// ============================================================================

//! Word Record - The fundamental unit of vocabulary memory
//!
//! Each record tracks one word's scheduling state:
//! - Identity (the word text) and its gloss
//! - SM2 state (repetitions, interval, ease factor)
//! - Review dates and a derived forgetting-risk estimate

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{WordError, WordStatus};

/// Ease factor every word starts with.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

// ============================================================================
// WORD RECORD
// ============================================================================

/// A single vocabulary word and its memory state
///
/// Identity is `text` (case-sensitive, unique within a collection). The
/// record is a plain value: the engine mutates a copy and hands it back for
/// the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    /// The word itself, also the record's key
    pub text: String,
    /// Target-language gloss
    pub meaning: String,
    /// Optional example sentence, informational only
    #[serde(default)]
    pub example: String,
    /// Review cycles since the last reset
    pub repetitions: u32,
    /// Days until the next scheduled review, always >= 1
    pub interval: i64,
    /// SM2 ease factor, kept within [1.3, 2.5]
    pub ease_factor: f64,
    /// The record is due once this date arrives
    pub next_review: NaiveDate,
    /// Absent until the first review
    pub last_reviewed: Option<NaiveDate>,
    /// Set once at creation
    pub created_at: NaiveDate,
    /// Cached forgetting risk; recomputed on every read that matters
    pub forget_risk: f64,
}

impl WordRecord {
    /// Create a new word scheduled for its first review tomorrow.
    ///
    /// Rejects empty `text` or `meaning` (after trimming) so that malformed
    /// records never enter scheduling.
    pub fn new(
        text: impl Into<String>,
        meaning: impl Into<String>,
        example: impl Into<String>,
        today: NaiveDate,
    ) -> Result<Self, WordError> {
        let text = text.into();
        let meaning = meaning.into();
        if text.trim().is_empty() {
            return Err(WordError::EmptyText);
        }
        if meaning.trim().is_empty() {
            return Err(WordError::EmptyMeaning(text));
        }
        Ok(Self {
            text,
            meaning,
            example: example.into(),
            repetitions: 0,
            interval: 1,
            ease_factor: INITIAL_EASE_FACTOR,
            next_review: today + Duration::days(1),
            last_reviewed: None,
            created_at: today,
            forget_risk: 1.0,
        })
    }

    /// Estimate how likely this word has been forgotten by `today`.
    ///
    /// Tiered by repetition count: early repetitions decay on fixed day
    /// thresholds, later ones relative to the word's own interval. A word
    /// never reviewed is always at maximum risk.
    pub fn forget_risk_at(&self, today: NaiveDate) -> f64 {
        let Some(last_reviewed) = self.last_reviewed else {
            return 1.0;
        };
        if self.repetitions == 0 {
            return 1.0;
        }

        let days_since = (today - last_reviewed).num_days();

        if self.repetitions <= 1 {
            if days_since <= 1 {
                0.1
            } else if days_since <= 7 {
                0.3
            } else {
                0.7
            }
        } else if self.repetitions <= 3 {
            if days_since <= 7 {
                0.1
            } else if days_since <= 30 {
                0.3
            } else {
                0.5
            }
        } else {
            let days_since = days_since as f64;
            let interval = self.interval as f64;
            if days_since <= interval * 0.5 {
                0.1
            } else if days_since <= interval {
                0.3
            } else if days_since <= interval * 2.0 {
                0.6
            } else {
                0.9
            }
        }
    }

    /// Recompute and cache the forgetting risk as of `today`.
    pub fn refresh_risk(&mut self, today: NaiveDate) {
        self.forget_risk = self.forget_risk_at(today);
    }

    /// A word that has never completed a review cycle.
    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    /// Reviewed before and scheduled on or before `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.repetitions > 0 && self.next_review <= today
    }

    /// Days elapsed since the last review, if any.
    pub fn days_since_review(&self, today: NaiveDate) -> Option<i64> {
        self.last_reviewed.map(|last| (today - last).num_days())
    }

    /// Coarse progress classification used by listings and statistics.
    pub fn status(&self) -> WordStatus {
        if self.repetitions == 0 {
            WordStatus::New
        } else if self.repetitions >= 3 && self.ease_factor >= INITIAL_EASE_FACTOR {
            WordStatus::Mastered
        } else {
            WordStatus::Learning
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

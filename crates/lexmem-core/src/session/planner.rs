//! Daily session planning and the per-word attempt state machine
//!
//! A session is planned once from the full record set: the review segment
//! (high-risk words merged with due words) followed by the new-word
//! segment, both truncated to the daily limits and frozen for the rest of
//! the sitting. Answers then drive a small state machine: a first miss
//! earns one retry, a second miss defers the word to a wrong-this-round
//! queue that is replayed until a pass produces no new misses.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::{evaluate, QuizMode};
use crate::sm2::Sm2Scheduler;
use crate::store::{StoreError, WordStore};
use crate::word::WordRecord;

/// Risk threshold for pulling not-yet-due words into the review pool.
const REVIEW_POOL_RISK_THRESHOLD: f64 = 0.6;

/// Grade at or above which an answer is accepted as correct.
const PASS_QUALITY: u8 = 4;

/// Attempts allowed per word and pass (one retry after the first miss).
const MAX_ATTEMPTS: u32 = 2;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How the new-word segment of a session is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderMode {
    /// Alphabetical by lowercased word text
    #[default]
    Sequential,
    /// Shuffled
    Random,
    /// Strongest memory first (ease factor descending)
    ByEase,
    /// Most-reviewed first (repetitions descending)
    ByRepetitions,
    /// Riskiest first (forgetting risk descending)
    ByForgetRisk,
}

impl OrderMode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderMode::Sequential => "sequential",
            OrderMode::Random => "random",
            OrderMode::ByEase => "by-ease",
            OrderMode::ByRepetitions => "by-repetitions",
            OrderMode::ByForgetRisk => "by-forget-risk",
        }
    }
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(OrderMode::Sequential),
            "random" => Ok(OrderMode::Random),
            "by-ease" | "ease" => Ok(OrderMode::ByEase),
            "by-repetitions" | "repetitions" => Ok(OrderMode::ByRepetitions),
            "by-forget-risk" | "risk" => Ok(OrderMode::ByForgetRisk),
            _ => Err(format!("unknown order mode: {}", s)),
        }
    }
}

/// Daily study plan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyConfig {
    /// New words introduced per day
    pub daily_new_limit: usize,
    /// Review words per day
    pub daily_review_limit: usize,
    /// Ordering applied to the new-word segment
    pub order_mode: OrderMode,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            daily_new_limit: 20,
            daily_review_limit: 50,
            order_mode: OrderMode::Sequential,
        }
    }
}

// ============================================================================
// SELECTION PRIMITIVES
// ============================================================================

/// Words that have never completed a review cycle.
pub fn new_words(records: &[WordRecord]) -> Vec<WordRecord> {
    records.iter().filter(|w| w.is_new()).cloned().collect()
}

/// Reviewed words whose next review date has arrived.
pub fn due_words(records: &[WordRecord], today: NaiveDate) -> Vec<WordRecord> {
    records.iter().filter(|w| w.is_due(today)).cloned().collect()
}

/// Sort `words` in place according to `mode`.
pub fn order_records<R: Rng>(words: &mut [WordRecord], mode: OrderMode, rng: &mut R) {
    match mode {
        OrderMode::Sequential => words.sort_by_key(|w| w.text.to_lowercase()),
        OrderMode::Random => words.shuffle(rng),
        OrderMode::ByEase => words.sort_by(|a, b| b.ease_factor.total_cmp(&a.ease_factor)),
        OrderMode::ByRepetitions => words.sort_by(|a, b| b.repetitions.cmp(&a.repetitions)),
        OrderMode::ByForgetRisk => words.sort_by(|a, b| b.forget_risk.total_cmp(&a.forget_risk)),
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Feedback category for one submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feedback {
    /// Accepted; the word's schedule was updated
    Correct,
    /// First miss; the same word is presented again
    TryAgain,
    /// Second miss; scheduled with a penalty and deferred to the replay pass
    Wrong,
}

/// What one call to [`Session::submit`] decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Evaluator grade for the raw input
    pub quality: u8,
    /// Feedback category to show the learner
    pub feedback: Feedback,
    /// Whether the word is finished and the session is ready to advance
    pub advanced: bool,
}

/// Progress snapshot of a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// Zero-based position in the active queue
    pub current_index: usize,
    /// Length of the active queue
    pub total: usize,
    /// Correct answers so far, across all passes
    pub correct_count: u32,
}

/// End-of-session report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Words in the originally planned queue
    pub total_words: usize,
    /// Correct answers across all passes
    pub correct_count: u32,
    /// Percentage of the planned queue answered correctly, capped at 100
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for an answer to the current word
    Answering,
    /// Answer accepted; waiting for the paced advance
    Feedback,
    /// Queue and replay passes exhausted
    Complete,
}

#[derive(Debug, Clone)]
struct PendingSave {
    updated: WordRecord,
    quality: u8,
    feedback: Feedback,
}

// ============================================================================
// SESSION
// ============================================================================

/// One day's study session: a frozen queue plus the attempt state machine.
///
/// Build with [`Session::build`], then loop: show [`Session::current`],
/// feed the answer to [`Session::submit`], and once the outcome reports
/// `advanced`, call [`Session::advance`] after any pacing delay. A save
/// failure keeps the computed update in memory; [`Session::retry_save`]
/// re-attempts persistence without grading the answer again.
#[derive(Debug)]
pub struct Session {
    queue: Vec<WordRecord>,
    index: usize,
    phase: Phase,
    mode: QuizMode,
    today: NaiveDate,
    attempt: u32,
    pass: u32,
    correct_count: u32,
    original_total: usize,
    review_count: usize,
    new_count: usize,
    wrong_this_round: Vec<WordRecord>,
    pending: Option<PendingSave>,
    scheduler: Sm2Scheduler,
}

impl Session {
    /// Plan today's session from the full record set.
    pub fn build(
        records: &[WordRecord],
        config: &StudyConfig,
        mode: QuizMode,
        today: NaiveDate,
    ) -> Self {
        Self::build_with_rng(records, config, mode, today, &mut rand::thread_rng())
    }

    /// [`Session::build`] with a caller-supplied source of randomness.
    pub fn build_with_rng<R: Rng>(
        records: &[WordRecord],
        config: &StudyConfig,
        mode: QuizMode,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let scheduler = Sm2Scheduler::new();

        let mut fresh = new_words(records);
        order_records(&mut fresh, config.order_mode, rng);
        fresh.truncate(config.daily_new_limit);

        // Merge high-risk and due words, first occurrence winning, so a word
        // in both lists keeps its high-risk entry.
        let mut pool: IndexMap<String, WordRecord> = IndexMap::new();
        for word in scheduler.high_risk_words(records, REVIEW_POOL_RISK_THRESHOLD, today) {
            pool.entry(word.text.clone()).or_insert(word);
        }
        for mut word in due_words(records, today) {
            word.refresh_risk(today);
            pool.entry(word.text.clone()).or_insert(word);
        }
        let mut review: Vec<WordRecord> = pool.into_values().collect();
        review.sort_by(|a, b| b.forget_risk.total_cmp(&a.forget_risk));
        review.truncate(config.daily_review_limit);

        let review_count = review.len();
        let new_count = fresh.len();
        let mut queue = review;
        queue.extend(fresh);
        let original_total = queue.len();

        debug!(
            review = review_count,
            new = new_count,
            order = %config.order_mode,
            "session planned"
        );

        let phase = if queue.is_empty() {
            Phase::Complete
        } else {
            Phase::Answering
        };
        Self {
            queue,
            index: 0,
            phase,
            mode,
            today,
            attempt: 0,
            pass: 1,
            correct_count: 0,
            original_total,
            review_count,
            new_count,
            wrong_this_round: Vec::new(),
            pending: None,
            scheduler,
        }
    }

    /// The word awaiting an answer, if any.
    pub fn current(&self) -> Option<&WordRecord> {
        match self.phase {
            Phase::Answering => self.queue.get(self.index),
            _ => None,
        }
    }

    /// Whether the current word belongs to the planned review segment.
    ///
    /// Replay passes re-present missed words, so everything after the first
    /// pass counts as review.
    pub fn current_is_review(&self) -> bool {
        self.pass > 1 || self.index < self.review_count
    }

    /// Active quiz direction.
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    /// Switch the quiz direction for subsequent words.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.mode = mode;
    }

    /// Words in the planned review segment.
    pub fn review_count(&self) -> usize {
        self.review_count
    }

    /// Words in the planned new segment.
    pub fn new_count(&self) -> usize {
        self.new_count
    }

    /// One-based replay pass counter.
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Whether every pass has finished.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Whether a computed update is still waiting to be persisted.
    pub fn has_pending_save(&self) -> bool {
        self.pending.is_some()
    }

    /// Progress over the active queue.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            current_index: self.index,
            total: self.queue.len(),
            correct_count: self.correct_count,
        }
    }

    /// Final report, available once the session is complete.
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != Phase::Complete {
            return None;
        }
        let accuracy = if self.original_total == 0 {
            0.0
        } else {
            let raw = self.correct_count as f64 / self.original_total as f64 * 100.0;
            raw.min(100.0)
        };
        Some(SessionSummary {
            total_words: self.original_total,
            correct_count: self.correct_count,
            accuracy,
        })
    }

    /// Grade `raw_input` for the current word and apply the result.
    ///
    /// Returns `Ok(None)` when there is nothing to answer (the session is
    /// complete, waiting on [`Session::advance`], or waiting on
    /// [`Session::retry_save`]). On a save failure the session state is
    /// untouched apart from remembering the computed update.
    pub fn submit(
        &mut self,
        raw_input: &str,
        store: &dyn WordStore,
    ) -> Result<Option<SubmitOutcome>, StoreError> {
        if self.phase != Phase::Answering || self.pending.is_some() {
            return Ok(None);
        }
        let Some(word) = self.queue.get(self.index) else {
            return Ok(None);
        };

        self.attempt += 1;
        let quality = evaluate(self.mode, raw_input, word);

        if quality >= PASS_QUALITY {
            let updated = self.scheduler.update(word.clone(), quality, self.today);
            self.persist(updated, quality, Feedback::Correct, store)
                .map(Some)
        } else if self.attempt < MAX_ATTEMPTS {
            Ok(Some(SubmitOutcome {
                quality,
                feedback: Feedback::TryAgain,
                advanced: false,
            }))
        } else {
            // Out of attempts: schedule with a one-grade penalty and defer
            // the word to the replay pass.
            let penalized = quality.saturating_sub(1);
            let updated = self.scheduler.update(word.clone(), penalized, self.today);
            self.persist(updated, quality, Feedback::Wrong, store)
                .map(Some)
        }
    }

    /// Re-attempt a save that failed, without re-grading the answer.
    ///
    /// Returns `Ok(None)` when nothing is pending.
    pub fn retry_save(
        &mut self,
        store: &dyn WordStore,
    ) -> Result<Option<SubmitOutcome>, StoreError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        match store.save(&pending.updated) {
            Ok(()) => Ok(Some(self.commit(pending.updated, pending.quality, pending.feedback))),
            Err(e) => {
                self.pending = Some(pending);
                Err(e)
            }
        }
    }

    /// Move past the feedback step to the next word.
    ///
    /// This is the deferred half of the transition: callers insert their
    /// pacing delay before invoking it. A no-op unless feedback is showing.
    pub fn advance(&mut self) {
        if self.phase != Phase::Feedback {
            return;
        }
        self.attempt = 0;
        self.index += 1;
        if self.index < self.queue.len() {
            self.phase = Phase::Answering;
            return;
        }
        if self.wrong_this_round.is_empty() {
            self.phase = Phase::Complete;
            debug!(
                correct = self.correct_count,
                total = self.original_total,
                "session complete"
            );
            return;
        }
        // Replay the words missed this pass
        self.queue = std::mem::take(&mut self.wrong_this_round);
        self.index = 0;
        self.pass += 1;
        self.phase = Phase::Answering;
        debug!(pass = self.pass, words = self.queue.len(), "replaying missed words");
    }

    fn persist(
        &mut self,
        updated: WordRecord,
        quality: u8,
        feedback: Feedback,
        store: &dyn WordStore,
    ) -> Result<SubmitOutcome, StoreError> {
        if let Err(e) = store.save(&updated) {
            self.pending = Some(PendingSave {
                updated,
                quality,
                feedback,
            });
            return Err(e);
        }
        Ok(self.commit(updated, quality, feedback))
    }

    fn commit(&mut self, updated: WordRecord, quality: u8, feedback: Feedback) -> SubmitOutcome {
        match feedback {
            Feedback::Correct => self.correct_count += 1,
            Feedback::Wrong => {
                if !self
                    .wrong_this_round
                    .iter()
                    .any(|w| w.text == updated.text)
                {
                    self.wrong_this_round.push(updated.clone());
                }
            }
            Feedback::TryAgain => {}
        }
        self.queue[self.index] = updated;
        self.phase = Phase::Feedback;
        SubmitOutcome {
            quality,
            feedback,
            advanced: true,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

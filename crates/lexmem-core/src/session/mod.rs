//! Session Module - daily queue planning and the study state machine
//!
//! Builds the frozen daily queue (review words first, then new words),
//! grades answers, applies the scheduler, writes through to the store, and
//! replays missed words until a pass is clean. Advancing past feedback is
//! a separate step so the pacing delay between words stays outside the
//! engine.

mod planner;

pub use planner::{
    due_words, new_words, order_records, Feedback, OrderMode, Session, SessionStatus,
    SessionSummary, StudyConfig, SubmitOutcome,
};

use std::time::Duration;

/// Delay shown between feedback and the next word.
pub const FEEDBACK_PAUSE: Duration = Duration::from_millis(1500);

/// Pacing between feedback and the next word.
///
/// The session itself never sleeps; a driver pairs [`Pacer::pause`] with
/// [`Session::advance`] so tests can run the same transition with
/// [`NoopPacer`] and no wall-clock wait.
pub trait Pacer {
    /// Block for the pacing delay.
    fn pause(&self, duration: Duration);
}

/// Pacer that really sleeps, for interactive drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Pacer that returns immediately, for tests and scripted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause(&self, _duration: Duration) {}
}

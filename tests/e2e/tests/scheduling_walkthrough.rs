//! Multi-day scheduling walkthrough
//!
//! Follows one word through a realistic review history and checks every
//! intermediate schedule, then covers the scheduler's boundary behavior.

use chrono::Duration;
use lexmem_core::{
    evaluate_meaning, evaluate_spelling, Sm2Scheduler, WordRecord, MAX_EASE_FACTOR,
    MIN_EASE_FACTOR,
};
use lexmem_e2e_tests::fixtures::today;

#[test]
fn one_word_through_a_week() {
    let scheduler = Sm2Scheduler::new();
    let day0 = today();

    // Day 0: created, due tomorrow, maximal risk
    let word = WordRecord::new("apple", "苹果", "", day0).unwrap();
    assert_eq!(word.next_review, day0 + Duration::days(1));
    assert_eq!(word.forget_risk_at(day0), 1.0);

    // Day 0: perfect recall. Ease is already at its ceiling.
    let word = scheduler.update(word, 5, day0);
    assert_eq!(word.repetitions, 1);
    assert_eq!(word.ease_factor, 2.5);
    assert_eq!(word.interval, 1);
    assert_eq!(word.next_review, day0 + Duration::days(1));
    assert_eq!(word.forget_risk, 0.1);

    // Day 1: correct with effort, three-day warm-up interval
    let day1 = day0 + Duration::days(1);
    let word = scheduler.update(word, 3, day1);
    assert_eq!(word.repetitions, 2);
    assert_eq!(word.ease_factor, 2.5);
    assert_eq!(word.interval, 3);
    assert_eq!(word.next_review, day1 + Duration::days(3));

    // Day 4: a lapse resets the schedule and dents the ease factor
    let day4 = day1 + Duration::days(3);
    let word = scheduler.update(word, 1, day4);
    assert_eq!(word.repetitions, 0);
    assert_eq!(word.interval, 1);
    assert_eq!(word.ease_factor, 2.0);

    // Day 5 onward: recovery grows the interval by the ease factor
    let day5 = day4 + Duration::days(1);
    let word = scheduler.update(word, 4, day5);
    assert_eq!(word.repetitions, 1);
    assert_eq!(word.interval, 1);

    let day6 = day5 + Duration::days(1);
    let word = scheduler.update(word, 4, day6);
    assert_eq!(word.repetitions, 2);
    assert_eq!(word.interval, 3);

    let day9 = day6 + Duration::days(3);
    let word = scheduler.update(word, 4, day9);
    assert_eq!(word.repetitions, 3);
    // ease recovered to 2.3; floor(3 * 2.3) = 6
    assert!((word.ease_factor - 2.3).abs() < 1e-9);
    assert_eq!(word.interval, 6);
    assert_eq!(word.next_review, day9 + Duration::days(6));
}

#[test]
fn ease_factor_is_bounded_under_any_history() {
    let scheduler = Sm2Scheduler::new();
    let day = today();

    let mut word = WordRecord::new("apple", "苹果", "", day).unwrap();
    for quality in [0, 5, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 0, 2, 7, 3] {
        word = scheduler.update(word, quality, day);
        assert!(word.ease_factor >= MIN_EASE_FACTOR);
        assert!(word.ease_factor <= MAX_EASE_FACTOR);
        assert!(word.interval >= 1);
        assert!((0.0..=1.0).contains(&word.forget_risk));
    }
}

#[test]
fn risk_tiers_shift_with_repetition_count() {
    let day = today();
    let mut word = WordRecord::new("apple", "苹果", "", day).unwrap();
    word.last_reviewed = Some(day);
    word.interval = 10;

    // Same 8-day gap reads differently as the word matures
    let later = day + Duration::days(8);
    word.repetitions = 1;
    assert_eq!(word.forget_risk_at(later), 0.7);
    word.repetitions = 3;
    assert_eq!(word.forget_risk_at(later), 0.3);
    word.repetitions = 6;
    assert_eq!(word.forget_risk_at(later), 0.3);
}

#[test]
fn evaluator_grades_match_scheduler_expectations() {
    // The examples the session planner relies on for pass/fail boundaries
    assert_eq!(evaluate_meaning("测试", "测试"), 5);
    assert_eq!(evaluate_meaning("", "测试"), 0);
    assert_eq!(evaluate_spelling("test", "test"), 5);
    assert_eq!(evaluate_spelling("wrold", "world"), 2);

    // Containment clears the pass bar, close length does not
    assert_eq!(evaluate_meaning("苹果", "苹果树"), 4);
    assert_eq!(evaluate_meaning("香蕉", "苹果"), 3);
}

#[test]
fn high_risk_scan_never_returns_due_words() {
    let scheduler = Sm2Scheduler::new();
    let day = today();

    let mut words = Vec::new();
    for i in 0..20 {
        let mut word = WordRecord::new(format!("word{i}"), "释义", "", day).unwrap();
        word.repetitions = 1 + (i % 3);
        word.interval = 5;
        word.last_reviewed = Some(day - Duration::days(i64::from(i)));
        // Half due, half scheduled ahead
        word.next_review = if i % 2 == 0 {
            day - Duration::days(1)
        } else {
            day + Duration::days(4)
        };
        words.push(word);
    }

    for found in scheduler.high_risk_words(&words, 0.0, day) {
        assert!(found.next_review > day);
    }
}

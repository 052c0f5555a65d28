//! Full study-session journey against a real SQLite store
//!
//! Seeds a collection, plans the daily session, answers every word
//! (including misses and replays), and checks what landed on disk.

use lexmem_core::{Feedback, OrderMode, QuizMode, Session, StudyConfig, WordStore};
use lexmem_e2e_tests::fixtures::{due_word, fresh_batch, fresh_word, risky_word, today};
use lexmem_e2e_tests::harness::TestStoreManager;

fn sequential_config(new: usize, review: usize) -> StudyConfig {
    StudyConfig {
        daily_new_limit: new,
        daily_review_limit: review,
        order_mode: OrderMode::Sequential,
    }
}

#[test]
fn perfect_session_updates_every_word() {
    let manager = TestStoreManager::seeded([
        fresh_word("apple", "苹果"),
        fresh_word("banana", "香蕉"),
        due_word("cherry", 2, 1),
    ]);

    let records = manager.reload();
    let mut session = Session::build(
        &records,
        &sequential_config(20, 50),
        QuizMode::Meaning,
        today(),
    );

    assert_eq!(session.review_count(), 1);
    assert_eq!(session.new_count(), 2);

    // Review segment comes first
    assert_eq!(session.current().unwrap().text, "cherry");

    while let Some(word) = session.current().cloned() {
        let outcome = session
            .submit(&word.meaning, &manager.store)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.feedback, Feedback::Correct);
        session.advance();
    }

    let summary = session.summary().unwrap();
    assert_eq!(summary.total_words, 3);
    assert_eq!(summary.correct_count, 3);
    assert_eq!(summary.accuracy, 100.0);

    // Every word was written through with an updated schedule
    for record in manager.reload() {
        assert_eq!(record.last_reviewed, Some(today()));
        assert!(record.repetitions >= 1);
        assert!(record.next_review > today());
    }
    // cherry moved from repetitions 2 to 3
    assert_eq!(manager.fetch("cherry").repetitions, 3);
}

#[test]
fn missed_words_are_replayed_and_persisted_with_penalty() {
    let manager = TestStoreManager::seeded([fresh_word("apple", "苹果")]);
    let records = manager.reload();
    let mut session = Session::build(
        &records,
        &sequential_config(20, 50),
        QuizMode::Spelling,
        today(),
    );

    // Two misses: retry first, then a penalized schedule update
    let first = session.submit("aple", &manager.store).unwrap().unwrap();
    assert_eq!(first.feedback, Feedback::TryAgain);
    assert!(!first.advanced);

    let second = session.submit("aple", &manager.store).unwrap().unwrap();
    assert_eq!(second.feedback, Feedback::Wrong);
    assert!(second.advanced);

    // Quality 1 penalized to 0: failure path resets the schedule
    let on_disk = manager.fetch("apple");
    assert_eq!(on_disk.repetitions, 0);
    assert_eq!(on_disk.interval, 1);
    assert!(on_disk.ease_factor < 2.5);

    session.advance();

    // The miss replays in a second pass; a correct answer closes the session
    assert!(!session.is_complete());
    assert_eq!(session.pass(), 2);
    let replay = session.submit("apple", &manager.store).unwrap().unwrap();
    assert_eq!(replay.feedback, Feedback::Correct);
    session.advance();
    assert!(session.is_complete());

    let summary = session.summary().unwrap();
    assert_eq!(summary.total_words, 1);
    assert!(summary.accuracy <= 100.0);

    // The replay's success was persisted on top of the penalty
    assert_eq!(manager.fetch("apple").repetitions, 1);
}

#[test]
fn review_pool_merges_risky_and_due_without_duplicates() {
    let mut seeds = vec![risky_word("risky"), due_word("due-a", 1, 0), due_word("due-b", 1, 2)];
    seeds.extend(fresh_batch("fresh", 5));
    let manager = TestStoreManager::seeded(seeds);

    let records = manager.reload();
    let session = Session::build(
        &records,
        &sequential_config(2, 10),
        QuizMode::Meaning,
        today(),
    );

    assert_eq!(session.review_count(), 3);
    assert_eq!(session.new_count(), 2);

    // No text appears twice across the whole queue
    let mut texts: Vec<String> = Vec::new();
    let mut session = session;
    while let Some(word) = session.current().cloned() {
        texts.push(word.text.clone());
        session.submit(&word.meaning, &manager.store).unwrap();
        session.advance();
    }
    let mut deduped = texts.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(texts.len(), deduped.len());
}

#[test]
fn daily_limits_pick_highest_risk_reviews() {
    // 6 due words at varying staleness plus one high-risk word
    let manager = TestStoreManager::seeded([
        due_word("d0", 1, 0),
        due_word("d1", 1, 1),
        due_word("d2", 1, 10),
        due_word("d3", 2, 0),
        due_word("d4", 2, 30),
        due_word("d5", 4, 0),
        risky_word("risky"),
    ]);

    let records = manager.reload();
    let session = Session::build(
        &records,
        &sequential_config(0, 3),
        QuizMode::Meaning,
        today(),
    );

    let status = session.status();
    assert_eq!(status.total, 3);

    // The frozen queue is sorted by descending forgetting risk
    let mut session = session;
    let mut risks: Vec<f64> = Vec::new();
    while let Some(word) = session.current().cloned() {
        risks.push(word.forget_risk);
        session.submit(&word.meaning, &manager.store).unwrap();
        session.advance();
    }
    assert!(risks.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn session_queue_is_frozen_against_store_changes() {
    let manager = TestStoreManager::seeded(fresh_batch("word", 3));
    let records = manager.reload();
    let mut session = Session::build(
        &records,
        &sequential_config(10, 10),
        QuizMode::Meaning,
        today(),
    );
    assert_eq!(session.status().total, 3);

    // New words arriving mid-session do not join the queue
    manager.store.save(&fresh_word("late", "晚")).unwrap();

    let mut answered = 0;
    while let Some(word) = session.current().cloned() {
        session.submit(&word.meaning, &manager.store).unwrap();
        session.advance();
        answered += 1;
    }
    assert_eq!(answered, 3);
    assert_eq!(session.summary().unwrap().total_words, 3);
}

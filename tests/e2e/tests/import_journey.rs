//! Import-then-study journey
//!
//! Imports a CSV into a real store, verifies the dedup/skip reporting,
//! and confirms the imported words flow straight into session planning
//! and statistics.

use std::io::Write;

use lexmem_core::{import_csv, learning_stats, OrderMode, QuizMode, Session, StudyConfig};
use lexmem_e2e_tests::fixtures::{fresh_word, today};
use lexmem_e2e_tests::harness::TestStoreManager;

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

#[test]
fn imported_words_are_schedulable() {
    let manager = TestStoreManager::new_temp();
    let file = csv_file(
        "单词,释义,例句\n\
         apple,苹果,An apple a day.\n\
         banana,香蕉,\n\
         cherry,樱桃,\n",
    );

    let outcome = import_csv(&manager.store, file.path(), today()).unwrap();
    assert_eq!(outcome.imported, ["apple", "banana", "cherry"]);
    assert_eq!(outcome.total_rows, 3);

    // Imported words land as unreviewed records due tomorrow
    let records = manager.reload();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert!(record.is_new());
        assert_eq!(record.forget_risk, 1.0);
    }

    // They are immediately eligible for the new-word segment
    let session = Session::build(
        &records,
        &StudyConfig {
            daily_new_limit: 2,
            daily_review_limit: 50,
            order_mode: OrderMode::Sequential,
        },
        QuizMode::Meaning,
        today(),
    );
    assert_eq!(session.new_count(), 2);
    assert_eq!(session.review_count(), 0);

    let stats = learning_stats(&records, today());
    assert_eq!(stats.total_words, 3);
    assert_eq!(stats.new_words, 3);
}

#[test]
fn import_reports_skips_and_never_overwrites() {
    let manager = TestStoreManager::seeded([fresh_word("apple", "原本的释义")]);
    let file = csv_file(
        "word,meaning\n\
         apple,新的释义\n\
         ,无词\n\
         pear,梨\n",
    );

    let outcome = import_csv(&manager.store, file.path(), today()).unwrap();
    assert_eq!(outcome.imported, ["pear"]);
    assert_eq!(outcome.skipped.len(), 2);
    assert!(outcome.skipped.iter().any(|s| s.contains("apple")));

    // The existing record kept its meaning and schedule
    assert_eq!(manager.fetch("apple").meaning, "原本的释义");
    assert_eq!(manager.reload().len(), 2);
}

#[test]
fn import_rejects_unrecognizable_headers() {
    let manager = TestStoreManager::new_temp();
    let file = csv_file("colA,colB\nx,y\n");
    assert!(import_csv(&manager.store, file.path(), today()).is_err());
}

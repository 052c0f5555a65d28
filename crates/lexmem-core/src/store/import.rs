//! Bulk CSV import with column auto-detection
//!
//! Accepts spreadsheet exports whose headers name the word, meaning, and
//! optional example columns in English or Chinese. Rows with missing
//! fields and words already in the store are skipped, not overwritten.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use super::{Result, StoreError, WordStore};
use crate::word::WordRecord;

/// Header aliases recognized per column. Matching is case-insensitive and
/// also fires when an alias appears inside a longer header.
const WORD_ALIASES: &[&str] = &["word", "单词", "英文", "english", "vocabulary"];
const MEANING_ALIASES: &[&str] = &["meaning", "释义", "意思", "中文", "chinese", "translation"];
const EXAMPLE_ALIASES: &[&str] = &["example", "例句", "例子", "sentence"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Word,
    Meaning,
    Example,
}

fn normalize_column(header: &str) -> Option<Column> {
    let header = header.trim().to_lowercase();
    let matches = |aliases: &[&str]| {
        aliases
            .iter()
            .any(|alias| header == *alias || header.contains(alias))
    };
    if matches(WORD_ALIASES) {
        Some(Column::Word)
    } else if matches(MEANING_ALIASES) {
        Some(Column::Meaning)
    } else if matches(EXAMPLE_ALIASES) {
        Some(Column::Example)
    } else {
        None
    }
}

/// Result of one bulk import run
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Words added to the store
    pub imported: Vec<String>,
    /// Rows skipped, with the reason (missing fields, duplicates)
    pub skipped: Vec<String>,
    /// Rows that failed to save
    pub failed: Vec<String>,
    /// Data rows seen in the file
    pub total_rows: usize,
}

impl ImportOutcome {
    /// One-line summary of the run.
    pub fn summary(&self) -> String {
        format!(
            "imported {}, skipped {}, failed {}",
            self.imported.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// Import words from a CSV file into `store`.
///
/// The word and meaning columns are required; rows are reported by their
/// spreadsheet row number (header is row 1). Existing words are never
/// overwritten.
pub fn import_csv(
    store: &dyn WordStore,
    path: &Path,
    today: NaiveDate,
) -> Result<ImportOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    // First alias match wins per column, scanning headers left to right
    let mut columns: Vec<(Column, usize)> = Vec::new();
    for (idx, header) in reader.headers()?.iter().enumerate() {
        if let Some(col) = normalize_column(header) {
            if !columns.iter().any(|(c, _)| *c == col) {
                columns.push((col, idx));
            }
        }
    }
    let col_index = |col: Column| columns.iter().find(|(c, _)| *c == col).map(|(_, i)| *i);

    let (Some(word_idx), Some(meaning_idx)) =
        (col_index(Column::Word), col_index(Column::Meaning))
    else {
        return Err(StoreError::Import(
            "could not detect word and meaning columns in header".to_string(),
        ));
    };
    let example_idx = col_index(Column::Example);

    let existing: HashSet<String> = store
        .load_all()?
        .into_iter()
        .map(|w| w.text)
        .collect();

    let mut outcome = ImportOutcome::default();
    let mut seen_this_run: HashSet<String> = HashSet::new();

    for (i, row) in reader.records().enumerate() {
        let row_num = i + 2;
        outcome.total_rows += 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                outcome.failed.push(format!("row {row_num}: {e}"));
                continue;
            }
        };

        let field = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        let text = field(word_idx);
        let meaning = field(meaning_idx);
        let example = example_idx.map(field).unwrap_or_default();

        if text.is_empty() || meaning.is_empty() {
            outcome
                .skipped
                .push(format!("row {row_num}: word or meaning is empty"));
            continue;
        }
        if existing.contains(&text) || !seen_this_run.insert(text.clone()) {
            outcome
                .skipped
                .push(format!("row {row_num}: '{text}' already exists"));
            continue;
        }

        let word = match WordRecord::new(text.clone(), meaning, example, today) {
            Ok(word) => word,
            Err(e) => {
                outcome.failed.push(format!("row {row_num}: {e}"));
                continue;
            }
        };

        match store.save(&word) {
            Ok(()) => outcome.imported.push(text),
            Err(e) => outcome
                .failed
                .push(format!("row {row_num}: '{text}' failed to save: {e}")),
        }
    }

    info!(
        imported = outcome.imported.len(),
        skipped = outcome.skipped.len(),
        failed = outcome.failed.len(),
        "csv import finished"
    );
    Ok(outcome)
}

// ============================================================================
// TESTS
// ============================================================================

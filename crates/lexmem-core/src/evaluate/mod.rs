//! Answer Evaluator - scores free-text answers against the expected value
//!
//! Two pure, total functions returning a quality in 0..=5. These are
//! deliberately shallow heuristics (substring checks, positional mismatch
//! counts), not edit distance; the scheduler only needs a coarse grade.
//! All comparisons operate on Unicode scalar values, so CJK glosses and
//! ASCII spellings are graded the same way.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::word::WordRecord;

/// Which direction a session quizzes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Show the word, ask for the meaning
    #[default]
    Meaning,
    /// Show the meaning, ask for the spelling
    Spelling,
}

impl QuizMode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Meaning => "meaning",
            QuizMode::Spelling => "spelling",
        }
    }
}

impl std::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meaning" => Ok(QuizMode::Meaning),
            "spelling" => Ok(QuizMode::Spelling),
            _ => Err(format!("unknown quiz mode: {}", s)),
        }
    }
}

/// Grade `input` against the field of `word` the active mode asks for.
pub fn evaluate(mode: QuizMode, input: &str, word: &WordRecord) -> u8 {
    match mode {
        QuizMode::Meaning => evaluate_meaning(input, &word.meaning),
        QuizMode::Spelling => evaluate_spelling(input, &word.text),
    }
}

/// Grade a meaning answer on similarity to the correct gloss.
///
/// Exact match scores 5, containment 4, close length 3, a shared pair of
/// characters 2, anything else 1. Empty input scores 0.
pub fn evaluate_meaning(input: &str, correct_meaning: &str) -> u8 {
    let input = input.trim().to_lowercase();
    let correct = correct_meaning.trim().to_lowercase();

    if input.is_empty() {
        return 0;
    }
    if input == correct {
        return 5;
    }
    if correct.contains(&input) || input.contains(&correct) {
        return 4;
    }

    let len_diff =
        (input.chars().count() as i64 - correct.chars().count() as i64).abs();
    if len_diff <= 2 {
        return 3;
    }

    let input_chars: HashSet<char> = input.chars().collect();
    let correct_chars: HashSet<char> = correct.chars().collect();
    if input_chars.intersection(&correct_chars).count() >= 2 {
        return 2;
    }

    1
}

/// Grade a spelling answer by positional comparison.
///
/// Exact match scores 5; equal length with one wrong position 3, with two
/// wrong positions 2. Near-misses of a different length fall through to 1.
/// Empty input scores 0.
pub fn evaluate_spelling(input: &str, correct_spelling: &str) -> u8 {
    let input = input.trim().to_lowercase();
    let correct = correct_spelling.trim().to_lowercase();

    if input.is_empty() {
        return 0;
    }
    if input == correct {
        return 5;
    }
    // Case-only mismatch scores 4. Only reachable if normalization and the
    // equality check above ever diverge; kept for answer-grading parity with
    // earlier releases.
    if input.to_lowercase() == correct.to_lowercase() {
        return 4;
    }

    let input_chars: Vec<char> = input.chars().collect();
    let correct_chars: Vec<char> = correct.chars().collect();
    if input_chars.len() == correct_chars.len() {
        let diff_count = input_chars
            .iter()
            .zip(&correct_chars)
            .filter(|(a, b)| a != b)
            .count();
        if diff_count == 1 {
            return 3;
        }
        if diff_count == 2 {
            return 2;
        }
    }

    1
}

// ============================================================================
// TESTS
// ============================================================================

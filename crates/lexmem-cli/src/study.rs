//! Interactive study loop
//!
//! Drives one session against the store: prompt, grade, feedback, paced
//! advance, and the end-of-session report. All decisions come from the
//! engine; this module only renders and reads lines.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use lexmem_core::{
    Feedback, Pacer, QuizMode, Session, StudyConfig, SubmitOutcome, WordStore, FEEDBACK_PAUSE,
};
use tracing::warn;

/// How often a failed save is retried before giving up on the session.
const SAVE_RETRIES: u32 = 3;

/// Run a full interactive session. Returns early if the word set is empty.
pub fn run_session(
    store: &dyn WordStore,
    config: &StudyConfig,
    mode: QuizMode,
    today: chrono::NaiveDate,
    pacer: &dyn Pacer,
) -> Result<()> {
    let records = store.load_all()?;
    let mut session = Session::build(&records, config, mode, today);

    if session.is_complete() {
        println!("\n{} Nothing to study today.", "✓".green());
        return Ok(());
    }

    println!();
    println!("{}", "=== Today's plan ===".cyan().bold());
    println!("  review words: {}", session.review_count());
    println!("  new words:    {}", session.new_count());
    println!("  total:        {}", session.status().total);
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // Pull everything the prompt needs as owned strings, so the session
        // is free to mutate while the learner types.
        let Some((prompt, expected)) = session.current().map(|word| match session.mode() {
            QuizMode::Meaning => (
                format!("meaning of '{}'", word.text.bold()),
                word.meaning.clone(),
            ),
            QuizMode::Spelling => (
                format!("word for '{}'", word.meaning.bold()),
                word.text.clone(),
            ),
        }) else {
            break;
        };

        let status = session.status();
        let kind = if session.current_is_review() {
            "review"
        } else {
            "new"
        };
        let progress = format!("[{}/{}]", status.current_index + 1, status.total);
        print!("{} {} {}: ", progress.dimmed(), kind.dimmed(), prompt);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\n{}", "Session ended early.".dimmed());
            break;
        };
        let answer = line?;

        let outcome = match session.submit(&answer, store) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "save failed, retrying");
                match retry_save(&mut session, store, pacer)? {
                    Some(outcome) => outcome,
                    None => continue,
                }
            }
        };

        match outcome.feedback {
            Feedback::Correct => {
                println!("  {} correct ({}/5)", "✓".green(), outcome.quality);
            }
            Feedback::TryAgain => {
                println!(
                    "  {} close, try once more ({}/5)",
                    "~".yellow(),
                    outcome.quality
                );
            }
            Feedback::Wrong => {
                println!(
                    "  {} wrong ({}/5), answer: {}",
                    "✗".red(),
                    outcome.quality,
                    expected
                );
            }
        }

        if outcome.advanced {
            pacer.pause(FEEDBACK_PAUSE);
            session.advance();
        }
    }

    if let Some(summary) = session.summary() {
        println!();
        println!("{}", "=== Session complete ===".cyan().bold());
        println!("  words studied: {}", summary.total_words);
        println!("  correct:       {}", summary.correct_count);
        println!("  accuracy:      {:.1}%", summary.accuracy);
    }
    Ok(())
}

fn retry_save(
    session: &mut Session,
    store: &dyn WordStore,
    pacer: &dyn Pacer,
) -> Result<Option<SubmitOutcome>> {
    for attempt in 1..=SAVE_RETRIES {
        pacer.pause(FEEDBACK_PAUSE);
        match session.retry_save(store) {
            Ok(outcome) => return Ok(outcome),
            Err(e) if attempt < SAVE_RETRIES => {
                warn!(error = %e, attempt, "save still failing");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

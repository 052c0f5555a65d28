//! Lexmem CLI
//!
//! Terminal front-end for the lexmem vocabulary review engine: add and
//! import words, inspect the collection, and run daily study sessions.

mod settings;
mod study;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use lexmem_core::{
    import_csv, learning_stats, Clock, OrderMode, QuizMode, Session, SleepPacer, Sm2Scheduler,
    SqliteStore, SystemClock, WordRecord, WordStore,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Lexmem - spaced-repetition vocabulary trainer
#[derive(Parser)]
#[command(name = "lexmem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spaced-repetition vocabulary trainer")]
#[command(
    long_about = "Lexmem schedules vocabulary reviews with an SM2-style algorithm,\n\
                  estimates forgetting risk, and plans a daily study session."
)]
struct Cli {
    /// Path to the word database (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListFilter {
    /// Every stored word
    All,
    /// Words never reviewed
    New,
    /// Words due for review today
    Due,
    /// Not-yet-due words at high forgetting risk
    AtRisk,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a single word
    Add {
        /// The word itself
        text: String,
        /// Target-language meaning
        meaning: String,
        /// Example sentence
        #[arg(long, default_value = "")]
        example: String,
    },

    /// Bulk-import words from a CSV file (columns auto-detected)
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List words with their review state
    List {
        /// Which words to show
        #[arg(long, value_enum, default_value = "all")]
        filter: ListFilter,
    },

    /// Remove a word from the store
    Remove {
        /// The word to remove
        text: String,
    },

    /// Show collection statistics
    Stats,

    /// Run today's study session
    Study {
        /// Quiz direction: meaning (word -> gloss) or spelling (gloss -> word)
        #[arg(long, default_value = "meaning")]
        mode: QuizMode,
        /// Override the daily new-word limit
        #[arg(long)]
        new: Option<usize>,
        /// Override the daily review limit
        #[arg(long)]
        review: Option<usize>,
        /// Override the ordering of new words
        #[arg(long)]
        order: Option<OrderMode>,
        /// Plan the session and show it without studying
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or update the saved study settings
    Config {
        /// Daily new-word limit
        #[arg(long)]
        new: Option<usize>,
        /// Daily review limit
        #[arg(long)]
        review: Option<usize>,
        /// Ordering of new words
        #[arg(long)]
        order: Option<OrderMode>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = SqliteStore::open(cli.db)?;

    match cli.command {
        Commands::Add {
            text,
            meaning,
            example,
        } => run_add(&store, text, meaning, example),
        Commands::Import { file } => run_import(&store, file),
        Commands::List { filter } => run_list(&store, filter),
        Commands::Remove { text } => run_remove(&store, text),
        Commands::Stats => run_stats(&store),
        Commands::Study {
            mode,
            new,
            review,
            order,
            dry_run,
        } => run_study(&store, mode, new, review, order, dry_run),
        Commands::Config { new, review, order } => run_config(new, review, order),
    }
}

fn run_add(store: &SqliteStore, text: String, meaning: String, example: String) -> Result<()> {
    let today = SystemClock.today();
    if store.get(&text)?.is_some() {
        bail!("'{text}' already exists");
    }
    let word = WordRecord::new(text, meaning, example, today)?;
    store.save(&word)?;
    println!(
        "{} added '{}', first review on {}",
        "✓".green(),
        word.text.bold(),
        word.next_review
    );
    Ok(())
}

fn run_import(store: &SqliteStore, file: PathBuf) -> Result<()> {
    let today = SystemClock.today();
    let outcome = import_csv(store, &file, today)?;

    println!("{} {}", "Import finished:".bold(), outcome.summary());
    for line in outcome.skipped.iter().chain(&outcome.failed) {
        println!("  {}", line.dimmed());
    }
    Ok(())
}

fn run_list(store: &SqliteStore, filter: ListFilter) -> Result<()> {
    let today = SystemClock.today();
    let records = store.load_all()?;

    let words: Vec<WordRecord> = match filter {
        ListFilter::All => records,
        ListFilter::New => lexmem_core::new_words(&records),
        ListFilter::Due => lexmem_core::due_words(&records, today),
        ListFilter::AtRisk => Sm2Scheduler::new().high_risk_words(&records, 0.6, today),
    };

    if words.is_empty() {
        println!("{}", "No words to show.".dimmed());
        return Ok(());
    }

    println!(
        "{:<18} {:<20} {:<10} {}",
        "WORD".bold(),
        "MEANING".bold(),
        "STATUS".bold(),
        "REVIEWS".bold()
    );
    for mut word in words {
        word.refresh_risk(today);
        let review_info = match word.days_since_review(today) {
            None => "never reviewed".to_string(),
            Some(days) => format!(
                "{}x, last {} ago, risk {:.0}%",
                word.repetitions,
                format_days(days),
                word.forget_risk * 100.0
            ),
        };
        println!(
            "{:<18} {:<20} {:<10} {}",
            word.text,
            truncate(&word.meaning, 18),
            word.status().to_string(),
            review_info
        );
    }
    Ok(())
}

fn run_remove(store: &SqliteStore, text: String) -> Result<()> {
    if store.delete(&text)? {
        println!("{} removed '{}'", "✓".green(), text);
    } else {
        println!("'{}' was not in the store", text);
    }
    Ok(())
}

fn run_stats(store: &SqliteStore) -> Result<()> {
    let today = SystemClock.today();
    let records = store.load_all()?;
    let stats = learning_stats(&records, today);

    println!("{}", "=== Learning statistics ===".cyan().bold());
    println!("  total words:     {}", stats.total_words);
    println!("  reviewed:        {}", stats.reviewed_words);
    println!("  reviewed today:  {}", stats.reviewed_today);
    println!("  due today:       {}", stats.due_today);
    println!("  high risk:       {}", stats.high_risk_words);
    println!();
    println!("  mastered:        {}", stats.mastered);
    println!("  learning:        {}", stats.learning);
    println!("  new:             {}", stats.new_words);
    println!();
    println!("  avg ease factor: {:.2}", stats.avg_ease_factor);
    println!("  total reviews:   {}", stats.total_reviews);
    Ok(())
}

fn run_study(
    store: &SqliteStore,
    mode: QuizMode,
    new: Option<usize>,
    review: Option<usize>,
    order: Option<OrderMode>,
    dry_run: bool,
) -> Result<()> {
    let mut config = settings::load_settings();
    if let Some(new) = new {
        config.daily_new_limit = new;
    }
    if let Some(review) = review {
        config.daily_review_limit = review;
    }
    if let Some(order) = order {
        config.order_mode = order;
    }

    let today = SystemClock.today();
    if dry_run {
        let records = store.load_all()?;
        let session = Session::build(&records, &config, mode, today);
        println!("review words: {}", session.review_count());
        println!("new words:    {}", session.new_count());
        return Ok(());
    }

    study::run_session(store, &config, mode, today, &SleepPacer)
}

fn run_config(new: Option<usize>, review: Option<usize>, order: Option<OrderMode>) -> Result<()> {
    let mut config = settings::load_settings();

    if new.is_none() && review.is_none() && order.is_none() {
        println!("daily new limit:    {}", config.daily_new_limit);
        println!("daily review limit: {}", config.daily_review_limit);
        println!("order mode:         {}", config.order_mode);
        return Ok(());
    }

    if let Some(new) = new {
        config.daily_new_limit = new;
    }
    if let Some(review) = review {
        config.daily_review_limit = review;
    }
    if let Some(order) = order {
        config.order_mode = order;
    }
    settings::save_settings(&config)?;
    println!("{} settings saved", "✓".green());
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn format_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        n if n < 30 => format!("{n} days"),
        n if n < 365 => format!("{} months", n / 30),
        n => format!("{} years", n / 365),
    }
}

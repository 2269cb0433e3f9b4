//! CLI command definitions and dispatch for the `moodbites` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod entries;
pub mod insights;
pub mod log;
pub mod preferences;
pub mod stats;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use moodbites_types::wellness::{MealType, QuickAction};

/// Your AI nutrition and mood coach.
#[derive(Parser)]
#[command(name = "moodbites", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Override the configured model.
    #[arg(long, global = true, env = "MOODBITES_MODEL")]
    pub model: Option<String>,

    /// Reply language code (en, es, fr, ...).
    #[arg(long, global = true, env = "MOODBITES_LANGUAGE")]
    pub language: Option<String>,

    /// Name used in the greeting.
    #[arg(long, global = true)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with the coach.
    Chat,

    /// Record a mood or a food.
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// Show logged moods and foods.
    Entries {
        /// Show at most this many of each, newest first.
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Manage remembered preferences.
    #[command(alias = "prefs")]
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommand,
    },

    /// Ask how some foods might be affecting a mood.
    Analyze {
        /// Mood score from 1 (very sad) to 7 (excellent).
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
        mood: u8,

        /// A food you ate (repeatable).
        #[arg(short, long = "food", required = true)]
        foods: Vec<String>,

        /// Extra context about how you feel.
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Get mood-boosting food suggestions.
    Recommend {
        /// Mood score from 1 (very sad) to 7 (excellent).
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
        mood: u8,
    },

    /// Averages and totals over the log, computed locally.
    Stats,

    /// Ask the coach a ready-made question about your log.
    Quick {
        /// analyze-mood, food-recommendations or nutrition-analysis.
        action: QuickAction,

        /// Current mood for food-recommendations; defaults to the latest logged.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
        mood: Option<u8>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum LogEntry {
    /// Log a mood score.
    Mood {
        /// Mood score from 1 (very sad) to 7 (excellent).
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        score: u8,

        /// Optional note.
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Log a food.
    Food {
        /// What you ate.
        name: String,

        /// Calories.
        #[arg(short, long, default_value = "0")]
        calories: u32,

        /// Meal: breakfast, lunch, dinner or snack.
        #[arg(short, long, default_value = "snack")]
        meal: MealType,
    },
}

#[derive(Subcommand)]
pub enum PreferencesCommand {
    /// List remembered preferences.
    #[command(alias = "ls")]
    List,

    /// Remember a preference.
    Add {
        /// The preference, e.g. "I am vegetarian".
        #[arg(required = true, num_args = 1..)]
        fact: Vec<String>,
    },
}

//! MoodBites CLI entry point.
//!
//! Binary name: `moodbites`
//!
//! Parses CLI arguments, initializes tracing, the database and services,
//! then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, LogEntry, PreferencesCommand};
use state::{AppState, Overrides};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,moodbites_core=debug,moodbites_infra=debug",
        _ => "trace",
    };
    moodbites_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "moodbites", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(Overrides {
        model: cli.model.clone(),
        language: cli.language.clone(),
        user_name: cli.name.clone(),
    })
    .await?;

    let result = match cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,

        Commands::Log { entry } => match entry {
            LogEntry::Mood { score, note } => cli::log::log_mood(&state, score, note, cli.json).await,
            LogEntry::Food {
                name,
                calories,
                meal,
            } => cli::log::log_food(&state, &name, calories, meal, cli.json).await,
        },

        Commands::Entries { limit } => cli::entries::list_entries(&state, limit, cli.json).await,

        Commands::Preferences { action } => match action {
            PreferencesCommand::List => cli::preferences::list_preferences(&state, cli.json).await,
            PreferencesCommand::Add { fact } => {
                cli::preferences::add_preference(&state, &fact.join(" "), cli.json).await
            }
        },

        Commands::Analyze { mood, foods, note } => {
            cli::insights::analyze(&state, mood, &foods, note.as_deref(), cli.json).await
        }

        Commands::Recommend { mood } => cli::insights::recommend(&state, mood, cli.json).await,

        Commands::Stats => cli::stats::show_stats(&state, cli.json).await,

        Commands::Quick { action, mood } => {
            cli::insights::quick(&state, action, mood, cli.json).await
        }

        Commands::Completions { .. } => Ok(()),
    };

    moodbites_observe::tracing_setup::shutdown_tracing();
    result
}

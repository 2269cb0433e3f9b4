//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: session setup, welcome banner,
//! greeting, the input loop with local controls, and reply rendering.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use moodbites_types::chat::{ChatMessage, MessageRole};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatControl};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// A "thinking..." spinner, hidden when output must stay machine-readable.
pub fn thinking_spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_message(renderer: &ChatRenderer, message: &ChatMessage) {
    match message.role {
        MessageRole::User => {
            println!("  {} {}", style("You >").green().bold(), message.content);
        }
        _ => renderer.print_reply(&message.content, message.degraded),
    }
    println!();
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let session = state.session().await?;
    let assistant = &state.config.assistant;

    print_welcome_banner(
        session.client().provider_name(),
        session.client().model(),
        &assistant.language,
        session.preferences().get().await.len(),
    );

    // Greeting, or the restored transcript
    let renderer = ChatRenderer::new();
    for message in session.messages() {
        print_message(&renderer, &message);
    }

    let (mut chat_input, _writer) =
        ChatInput::open().map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let mut turns = 0u32;
    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Line(text) => text,
            InputEvent::Blank => continue,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Quit => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
        };

        if let Some(control) = commands::parse(&text) {
            match control {
                ChatControl::Help => commands::print_help(),
                ChatControl::Clear => {
                    session.clear_session().await;
                    chat_input.clear();
                    for message in session.messages() {
                        print_message(&renderer, &message);
                    }
                }
                ChatControl::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
            }
            continue;
        }

        let spinner = thinking_spinner(false);
        let outcome = session.submit_user_turn(&text).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(reply) => {
                turns += 1;
                println!();
                print_message(&renderer, &reply);
            }
            Err(rejection) => {
                println!("  {} {rejection}", style("!").yellow().bold());
            }
        }
    }

    chat_input.flush();
    info!(turns, "chat session ended");
    Ok(())
}

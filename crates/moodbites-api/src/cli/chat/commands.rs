//! Local chat controls.
//!
//! These are handled by the terminal loop and never reach the session.
//! Every other slash command (`/recipe`, `/remember`, ...) is sent to the
//! session as a normal turn and answered by the command router.

use console::style;

use moodbites_core::command::router::help_text;

use super::renderer::ChatRenderer;

/// Controls understood by the chat loop itself.
#[derive(Debug, PartialEq)]
pub enum ChatControl {
    /// Show available commands.
    Help,
    /// Clear the conversation and the screen.
    Clear,
    /// Exit the chat session.
    Exit,
}

/// Parse user input as a local control.
///
/// Returns `None` for anything that should be sent to the session.
pub fn parse(input: &str) -> Option<ChatControl> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatControl::Help),
        "/clear" | "/cls" => Some(ChatControl::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatControl::Exit),
        _ => None,
    }
}

/// Controls handled by the terminal, never sent to the session.
pub const LOCAL_CONTROLS: [(&str, &str); 3] = [
    ("/help", "Show this help message"),
    ("/clear", "Start the conversation over"),
    ("/exit", "End the chat session"),
];

/// Print the help text listing assistant commands and local controls.
pub fn print_help() {
    println!();
    for line in ChatRenderer::new().render(&help_text(None)).trim_end().lines() {
        println!("  {line}");
    }
    println!();
    println!("  {}", style("Chat controls:").bold());
    println!();
    for (name, description) in LOCAL_CONTROLS {
        println!("  {}  {description}", style(format!("{name:<7}")).cyan());
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

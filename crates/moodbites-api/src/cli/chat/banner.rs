//! Welcome banner display for chat sessions.

use console::style;

/// Connection mode shown in the banner.
pub fn mode_label(provider: Option<&str>, model: &str) -> String {
    match provider {
        Some(name) => format!("{name} · {model}"),
        None => "offline (no API key)".to_string(),
    }
}

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(provider: Option<&str>, model: &str, language: &str, preferences: usize) {
    println!();
    println!("  🥗 {}", style("MoodBites").cyan().bold());
    println!("  {}", style("Your AI nutrition and mood coach").dim());
    println!();
    println!("  {}     {}", style("Model:").bold(), style(mode_label(provider, model)).dim());
    println!("  {}  {}", style("Language:").bold(), style(language).dim());
    if preferences > 0 {
        println!(
            "  {}  {}",
            style("Remembers:").bold(),
            style(format!(
                "{preferences} preference{}",
                if preferences == 1 { "" } else { "s" }
            ))
            .dim()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

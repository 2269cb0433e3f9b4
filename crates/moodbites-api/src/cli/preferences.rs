//! Preference management commands: list, add.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// List remembered preferences.
pub async fn list_preferences(state: &AppState, json: bool) -> Result<()> {
    let prefs = state.preferences.get().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
        return Ok(());
    }

    println!();
    if prefs.is_empty() {
        println!(
            "  {} No preferences saved. Add one with: {}",
            style("i").blue().bold(),
            style("moodbites preferences add I am vegetarian").yellow()
        );
    } else {
        for pref in &prefs {
            println!("  {} {}", style("•").cyan(), pref);
        }
    }
    println!();
    Ok(())
}

/// Remember a preference. Duplicates are accepted and ignored.
pub async fn add_preference(state: &AppState, fact: &str, json: bool) -> Result<()> {
    let fact = fact.trim();
    if fact.is_empty() {
        anyhow::bail!("preference is empty");
    }
    let added = state.preferences.add(fact).await?;

    if json {
        println!("{}", serde_json::json!({ "added": added, "preference": fact }));
    } else if added {
        println!("  {} I'll remember: {}", style("✓").green().bold(), style(fact).bold());
    } else {
        println!("  {} Already remembered: {}", style("i").blue().bold(), style(fact).dim());
    }
    Ok(())
}

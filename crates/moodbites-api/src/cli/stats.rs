//! Log stats computed locally, no model call.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use moodbites_core::wellness::stats::wellness_stats;
use moodbites_types::wellness::{WellnessStats, mood_label};

use crate::state::AppState;

fn average_mood_text(stats: &WellnessStats) -> String {
    match stats.average_mood {
        Some(average) => format!("{average:.1}/7"),
        None => "0.0/7".to_string(),
    }
}

fn stats_table(stats: &WellnessStats) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let latest = stats
        .latest_mood
        .map(|m| format!("{m} ({})", mood_label(m)))
        .unwrap_or_else(|| "none logged".to_string());
    let rows = [
        ("Mood entries", stats.mood_entries.to_string()),
        ("Average mood", average_mood_text(stats)),
        ("Latest mood", latest),
        ("Food entries", stats.food_entries.to_string()),
        ("Total calories", stats.total_calories.to_string()),
        ("Average calories", stats.average_calories.to_string()),
        ("Tracking consistency", format!("{}%", stats.tracking_consistency)),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value).fg(Color::Cyan)]);
    }
    table
}

/// Print averages and totals over the whole log.
pub async fn show_stats(state: &AppState, json: bool) -> Result<()> {
    let stats = wellness_stats(&state.wellness).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("── Your log ──").dim());
    println!("{}", stats_table(&stats));
    if stats.mood_entries == 0 && stats.food_entries == 0 {
        println!(
            "  {} Nothing logged yet. Try: {}",
            style("i").blue().bold(),
            style("moodbites log mood 5").yellow()
        );
    }
    println!();
    Ok(())
}

//! Table view of logged moods and foods.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use moodbites_core::wellness::provider::WellnessDataProvider;
use moodbites_types::wellness::{FoodEntry, MoodEntry, mood_label};

use crate::state::AppState;

/// The newest `limit` items, newest first. Input is oldest first.
fn newest_first<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().rev().take(limit).cloned().collect()
}

fn mood_table(moods: &[MoodEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Mood").fg(Color::White),
        Cell::new("Note").fg(Color::White),
    ]);
    for entry in moods {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
            Cell::new(format!("{} ({})", entry.mood, mood_label(entry.mood))).fg(Color::Cyan),
            Cell::new(entry.note.as_deref().unwrap_or("")),
        ]);
    }
    table
}

fn food_table(foods: &[FoodEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Food").fg(Color::White),
        Cell::new("Calories").fg(Color::White),
        Cell::new("Meal").fg(Color::White),
    ]);
    for entry in foods {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
            Cell::new(&entry.name).fg(Color::Cyan),
            Cell::new(entry.calories),
            Cell::new(entry.meal_type.to_string()),
        ]);
    }
    table
}

/// List logged moods and foods.
pub async fn list_entries(state: &AppState, limit: usize, json: bool) -> Result<()> {
    let moods = newest_first(&state.wellness.mood_entries().await?, limit);
    let foods = newest_first(&state.wellness.food_entries().await?, limit);

    if json {
        let out = serde_json::json!({ "moods": moods, "foods": foods });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if moods.is_empty() && foods.is_empty() {
        println!();
        println!(
            "  {} Nothing logged yet. Try: {}",
            style("i").blue().bold(),
            style("moodbites log mood 5").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    if !moods.is_empty() {
        println!("  {}", style("── Moods ──").dim());
        println!("{}", mood_table(&moods));
        println!();
    }
    if !foods.is_empty() {
        println!("  {}", style("── Foods ──").dim());
        println!("{}", food_table(&foods));
        println!();
    }
    Ok(())
}

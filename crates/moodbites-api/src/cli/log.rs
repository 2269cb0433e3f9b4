//! Mood and food logging commands.

use anyhow::Result;
use console::style;

use moodbites_types::wellness::{MealType, mood_label};

use crate::state::AppState;

/// Record a mood score.
pub async fn log_mood(state: &AppState, score: u8, note: Option<String>, json: bool) -> Result<()> {
    let entry = state.wellness.add_mood_entry(score, note).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "  {} Logged mood {} ({})",
            style("✓").green().bold(),
            style(entry.mood).bold(),
            style(mood_label(entry.mood)).cyan()
        );
    }
    Ok(())
}

/// Record a food.
pub async fn log_food(
    state: &AppState,
    name: &str,
    calories: u32,
    meal: MealType,
    json: bool,
) -> Result<()> {
    let entry = state.wellness.add_food_entry(name, calories, meal).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "  {} Logged {} ({} kcal, {})",
            style("✓").green().bold(),
            style(&entry.name).bold(),
            entry.calories,
            style(entry.meal_type).dim()
        );
    }
    Ok(())
}

//! Locally computed figures over the mood and food log.

use moodbites_types::error::RepositoryError;
use moodbites_types::wellness::{FoodEntry, MoodEntry, WellnessStats};

use super::provider::WellnessDataProvider;

/// Entries per week that count as fully consistent tracking.
pub const WEEKLY_TRACKING_TARGET: usize = 14;

/// Averages and totals over the given log. Entries are oldest first.
pub fn compute_stats(moods: &[MoodEntry], foods: &[FoodEntry]) -> WellnessStats {
    let average_mood = if moods.is_empty() {
        None
    } else {
        let sum: u64 = moods.iter().map(|e| u64::from(e.mood)).sum();
        Some(sum as f64 / moods.len() as f64)
    };

    let total_calories: u64 = foods.iter().map(|e| u64::from(e.calories)).sum();
    let average_calories = if foods.is_empty() {
        0
    } else {
        (total_calories as f64 / foods.len() as f64).round() as u64
    };

    let logged = moods.len() + foods.len();
    let tracking_consistency =
        ((logged as f64 / WEEKLY_TRACKING_TARGET as f64) * 100.0).round().min(100.0) as u8;

    WellnessStats {
        mood_entries: moods.len(),
        average_mood,
        latest_mood: moods.last().map(|e| e.mood),
        food_entries: foods.len(),
        total_calories,
        average_calories,
        tracking_consistency,
    }
}

/// Read the whole log from `data` and compute its stats.
pub async fn wellness_stats<W: WellnessDataProvider>(
    data: &W,
) -> Result<WellnessStats, RepositoryError> {
    let moods = data.mood_entries().await?;
    let foods = data.food_entries().await?;
    Ok(compute_stats(&moods, &foods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::provider::StaticWellnessData;
    use chrono::Utc;
    use moodbites_types::wellness::MealType;
    use uuid::Uuid;

    fn mood(score: u8) -> MoodEntry {
        MoodEntry {
            id: Uuid::now_v7(),
            mood: score,
            note: None,
            timestamp: Utc::now(),
        }
    }

    fn food(name: &str, calories: u32) -> FoodEntry {
        FoodEntry {
            id: Uuid::now_v7(),
            name: name.to_string(),
            calories,
            meal_type: MealType::Lunch,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_empty_log() {
        let stats = compute_stats(&[], &[]);
        assert_eq!(stats.mood_entries, 0);
        assert!(stats.average_mood.is_none());
        assert!(stats.latest_mood.is_none());
        assert_eq!(stats.total_calories, 0);
        assert_eq!(stats.average_calories, 0);
        assert_eq!(stats.tracking_consistency, 0);
    }

    #[test]
    fn test_averages_and_totals() {
        let stats = compute_stats(
            &[mood(4), mood(5), mood(7)],
            &[food("Oatmeal", 300), food("Salad", 251)],
        );
        let average = stats.average_mood.unwrap();
        assert!((average - 16.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.latest_mood, Some(7));
        assert_eq!(stats.total_calories, 551);
        // 275.5 rounds up
        assert_eq!(stats.average_calories, 276);
        // 5 of 14
        assert_eq!(stats.tracking_consistency, 36);
    }

    #[test]
    fn test_consistency_is_capped() {
        let moods: Vec<MoodEntry> = (0..20).map(|_| mood(5)).collect();
        assert_eq!(compute_stats(&moods, &[]).tracking_consistency, 100);
    }

    #[tokio::test]
    async fn test_stats_from_provider() {
        let data = StaticWellnessData {
            moods: vec![mood(2)],
            foods: vec![food("Soup", 180)],
        };
        let stats = wellness_stats(&data).await.unwrap();
        assert_eq!(stats.average_mood, Some(2.0));
        assert_eq!(stats.average_calories, 180);
    }
}

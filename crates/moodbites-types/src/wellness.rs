//! Mood and food log entries.
//!
//! The assistant only reads these (for `/summary`, stats and quick
//! actions); the surrounding application owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lowest valid mood score.
pub const MOOD_MIN: u8 = 1;
/// Highest valid mood score.
pub const MOOD_MAX: u8 = 7;

const MOOD_LABELS: [&str; 7] = [
    "very sad",
    "sad",
    "neutral",
    "good",
    "happy",
    "very happy",
    "excellent",
];

/// Human label for a 1..=7 mood score. Out-of-range scores read as "neutral".
pub fn mood_label(mood: u8) -> &'static str {
    if (MOOD_MIN..=MOOD_MAX).contains(&mood) {
        MOOD_LABELS[(mood - MOOD_MIN) as usize]
    } else {
        "neutral"
    }
}

/// A logged mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    /// Score on the 1..=7 scale.
    pub mood: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// When in the day a food was eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("invalid meal type: '{other}'")),
        }
    }
}

/// A logged food.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
    pub meal_type: MealType,
    pub timestamp: DateTime<Utc>,
}

/// Figures computed locally from the log, without the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessStats {
    pub mood_entries: usize,
    /// Mean mood score; `None` when no mood has been logged.
    pub average_mood: Option<f64>,
    /// Score of the most recent mood entry.
    pub latest_mood: Option<u8>,
    pub food_entries: usize,
    pub total_calories: u64,
    /// Mean calories per food entry, rounded; 0 for an empty food log.
    pub average_calories: u64,
    /// Entries logged against a target of two a day for a week, capped at 100.
    pub tracking_consistency: u8,
}

/// One-tap insight requests built from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    /// Mood patterns from the average score and entry count.
    AnalyzeMood,
    /// Foods for the current mood.
    FoodRecommendations,
    /// Review of the most recent foods.
    NutritionAnalysis,
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuickAction::AnalyzeMood => write!(f, "analyze-mood"),
            QuickAction::FoodRecommendations => write!(f, "food-recommendations"),
            QuickAction::NutritionAnalysis => write!(f, "nutrition-analysis"),
        }
    }
}

impl FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analyze-mood" | "mood" => Ok(QuickAction::AnalyzeMood),
            "food-recommendations" | "foods" => Ok(QuickAction::FoodRecommendations),
            "nutrition-analysis" | "nutrition" => Ok(QuickAction::NutritionAnalysis),
            other => Err(format!(
                "invalid quick action: '{other}' (expected analyze-mood, \
                 food-recommendations or nutrition-analysis)"
            )),
        }
    }
}

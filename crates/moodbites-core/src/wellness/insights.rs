//! One-shot insight requests and quick-action prompts.
//!
//! `analyze_mood_and_food` and `food_recommendations` back the `analyze`
//! and `recommend` CLI commands. They share the generation client's
//! resilience, so they also always return a reply. Quick actions only
//! build the text; the caller submits it as a chat turn.

use moodbites_types::error::RepositoryError;
use moodbites_types::llm::{AssistantReply, Message};
use moodbites_types::wellness::{FoodEntry, MoodEntry, QuickAction};

use super::provider::WellnessDataProvider;
use super::stats::compute_stats;
use crate::llm::client::GenerationClient;
use crate::llm::prompt::{
    analyze_prompt, mood_food_prompt, mood_pattern_prompt, nutrition_review_prompt,
    recommendation_prompt,
};
use crate::preference::store::PreferenceStore;
use crate::storage::kv_store::KvStore;

/// Mood assumed before anything has been logged.
pub const DEFAULT_CURRENT_MOOD: u8 = 7;

/// How the listed foods might be affecting the given mood.
pub async fn analyze_mood_and_food(
    client: &GenerationClient,
    mood: u8,
    foods: &[String],
    note: Option<&str>,
) -> AssistantReply {
    let prompt = analyze_prompt(mood, foods, note);
    client.generate(vec![Message::user(prompt)]).await
}

/// Mood-boosting food suggestions, shaped by remembered preferences.
pub async fn food_recommendations<K: KvStore>(
    client: &GenerationClient,
    preferences: &PreferenceStore<K>,
    mood: u8,
) -> AssistantReply {
    let prefs = preferences.get().await;
    let prompt = recommendation_prompt(mood, &prefs);
    client.generate(vec![Message::user(prompt)]).await
}

/// Prompt for `action` over a log given oldest first.
///
/// The current mood is `mood` when given, else the latest logged score,
/// else [`DEFAULT_CURRENT_MOOD`].
pub fn build_quick_action_prompt(
    action: QuickAction,
    moods: &[MoodEntry],
    foods: &[FoodEntry],
    mood: Option<u8>,
) -> String {
    match action {
        QuickAction::AnalyzeMood => {
            let stats = compute_stats(moods, &[]);
            mood_pattern_prompt(stats.average_mood, stats.mood_entries)
        }
        QuickAction::FoodRecommendations => {
            let current = mood
                .or_else(|| moods.last().map(|e| e.mood))
                .unwrap_or(DEFAULT_CURRENT_MOOD);
            mood_food_prompt(current)
        }
        QuickAction::NutritionAnalysis => nutrition_review_prompt(foods),
    }
}

/// Read the log from `data` and build the prompt for `action`.
pub async fn quick_action_prompt<W: WellnessDataProvider>(
    data: &W,
    action: QuickAction,
    mood: Option<u8>,
) -> Result<String, RepositoryError> {
    let moods = data.mood_entries().await?;
    let foods = data.food_entries().await?;
    Ok(build_quick_action_prompt(action, &moods, &foods, mood))
}

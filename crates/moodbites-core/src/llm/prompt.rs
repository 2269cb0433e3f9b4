//! Prompt builders for slash commands, insights and the chat directive.
//!
//! Every builder is a pure function of its inputs so prompts can be
//! asserted in tests without a provider.

use moodbites_types::command::DietaryTag;
use moodbites_types::wellness::{mood_label, FoodEntry, MoodEntry};

/// Prompt behind `/fact`.
pub const FACT_PROMPT: &str =
    "Give me a fun, science-based nutrition fact. Keep it short and engaging.";

/// Prompt behind `/motivate`.
pub const MOTIVATE_PROMPT: &str = "Share a motivational quote or tip for healthy eating and mood.";

/// Recipe request from parsed `/recipe` arguments.
///
/// Stored preferences are listed after the explicit dietary constraint so
/// the model sees both.
pub fn recipe_prompt(
    ingredients: &[String],
    dietary: Option<DietaryTag>,
    preferences: &[String],
) -> String {
    let mut prompt = format!(
        "Generate a creative, healthy recipe using these ingredients: {}.\n",
        ingredients.join(", ")
    );
    if let Some(tag) = dietary {
        prompt.push_str(&format!("Dietary restrictions: {tag}\n"));
    }
    if !preferences.is_empty() {
        prompt.push_str(&format!(
            "Keep in mind these user preferences: {}\n",
            preferences.join(", ")
        ));
    }
    prompt.push_str("Respond with a recipe name, ingredients, and step-by-step instructions.");
    prompt
}

/// Trend-analysis request over the full mood and food log.
pub fn summary_prompt(moods: &[MoodEntry], foods: &[FoodEntry]) -> String {
    let mood_summary = if moods.is_empty() {
        "No mood entries.".to_string()
    } else {
        let scores: Vec<String> = moods
            .iter()
            .map(|e| format!("{} ({})", e.mood, mood_label(e.mood)))
            .collect();
        format!("Mood entries: {}", scores.join(", "))
    };
    let food_summary = if foods.is_empty() {
        "No food entries.".to_string()
    } else {
        let names: Vec<String> = foods
            .iter()
            .map(|e| format!("{} ({} kcal, {})", e.name, e.calories, e.meal_type))
            .collect();
        format!("Foods: {}", names.join(", "))
    };
    format!(
        "Summarize my week:\n{mood_summary}\n{food_summary}\n\
         Give me a positive, actionable summary of my nutrition and mood trends."
    )
}

/// Insight request for a single mood reading and what was eaten.
pub fn analyze_prompt(mood: u8, foods: &[String], note: Option<&str>) -> String {
    let mut prompt = format!(
        "Analyze this mood and food data:\n\
         - Current mood: {} ({mood}/7)\n\
         - Foods consumed: {}\n",
        mood_label(mood),
        foods.join(", ")
    );
    if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
        prompt.push_str(&format!("- Additional notes: {}\n", note.trim()));
    }
    prompt.push_str(
        "\nProvide insights about how these foods might affect mood and suggest improvements.",
    );
    prompt
}

/// Food recommendations for a mood, shaped by stored preferences.
pub fn recommendation_prompt(mood: u8, preferences: &[String]) -> String {
    let mut prompt = format!(
        "Recommend mood-boosting foods for someone feeling {}.\n",
        mood_label(mood)
    );
    if !preferences.is_empty() {
        prompt.push_str(&format!("Dietary preferences: {}\n", preferences.join(", ")));
    }
    prompt.push_str(
        "\nProvide 5-7 specific food recommendations with brief explanations of how they help mood.",
    );
    prompt
}

/// Quick-action prompt about mood patterns.
pub fn mood_pattern_prompt(average_mood: Option<f64>, entries: usize) -> String {
    match average_mood {
        Some(average) if entries > 0 => format!(
            "Analyze my mood patterns. My recent average mood is {average:.1}/7 and I've \
             logged {entries} mood entries."
        ),
        _ => "I haven't tracked my mood yet. Can you help me understand how to start?"
            .to_string(),
    }
}

/// Quick-action prompt asking for foods that suit the current mood.
pub fn mood_food_prompt(current_mood: u8) -> String {
    format!(
        "Based on my current mood level of {current_mood}/7, what foods would you recommend \
         to improve my energy and happiness?"
    )
}

/// Most recent foods included in a nutrition review.
pub const NUTRITION_REVIEW_FOODS: usize = 5;

/// Quick-action prompt reviewing the newest foods. `foods` is oldest first.
pub fn nutrition_review_prompt(foods: &[FoodEntry]) -> String {
    if foods.is_empty() {
        return "I haven't logged any food yet. Can you help me understand how food affects mood?"
            .to_string();
    }
    let recent: Vec<&str> = foods
        .iter()
        .rev()
        .take(NUTRITION_REVIEW_FOODS)
        .map(|e| e.name.as_str())
        .collect();
    format!(
        "Analyze my recent food choices: {}. How are these affecting my mood and what \
         improvements can I make?",
        recent.join(", ")
    )
}

/// Display name for a short language code. Unknown codes pass through.
pub fn language_name(code: &str) -> &str {
    match code.to_lowercase().as_str() {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "hi" => "Hindi",
        "ja" => "Japanese",
        "zh" => "Chinese",
        _ => code,
    }
}

/// Directive turn prepended to free-form windows.
///
/// Returns `None` when there is nothing to say: no stored preferences and
/// an English reply language.
pub fn chat_directive(preferences: &[String], language: &str) -> Option<String> {
    let english = language.trim().is_empty() || language.eq_ignore_ascii_case("en");
    if preferences.is_empty() && english {
        return None;
    }

    let mut directive =
        String::from("You are a friendly AI nutrition and mood coach.");
    if !preferences.is_empty() {
        directive.push_str(&format!(
            " The user has asked you to remember: {}.",
            preferences.join(", ")
        ));
    }
    if !english {
        directive.push_str(&format!(
            " Always respond in {}.",
            language_name(language.trim())
        ));
    }
    Some(directive)
}

//! One-shot insight commands: analyze, recommend, quick.

use anyhow::Result;

use moodbites_core::wellness::insights::{
    analyze_mood_and_food, food_recommendations, quick_action_prompt,
};
use moodbites_types::llm::AssistantReply;
use moodbites_types::wellness::QuickAction;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

fn print_reply(reply: &AssistantReply, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }
    let renderer = ChatRenderer::new();
    println!();
    renderer.print_reply(&reply.text, reply.degraded);
    println!();
    Ok(())
}

/// Ask how the listed foods may be affecting a mood.
pub async fn analyze(
    state: &AppState,
    mood: u8,
    foods: &[String],
    note: Option<&str>,
    json: bool,
) -> Result<()> {
    let spinner = super::chat::loop_runner::thinking_spinner(json);
    let reply = analyze_mood_and_food(&state.client, mood, foods, note).await;
    spinner.finish_and_clear();
    print_reply(&reply, json)
}

/// Suggest foods for a mood, shaped by remembered preferences.
pub async fn recommend(state: &AppState, mood: u8, json: bool) -> Result<()> {
    let spinner = super::chat::loop_runner::thinking_spinner(json);
    let reply = food_recommendations(&state.client, &state.preferences, mood).await;
    spinner.finish_and_clear();
    print_reply(&reply, json)
}

/// Run a quick action as a chat turn, so remembered preferences, the reply
/// language and transcript persistence all apply.
pub async fn quick(
    state: &AppState,
    action: QuickAction,
    mood: Option<u8>,
    json: bool,
) -> Result<()> {
    let prompt = quick_action_prompt(&state.wellness, action, mood).await?;
    tracing::debug!(%action, "running quick action");

    let session = state.session().await?;
    let spinner = super::chat::loop_runner::thinking_spinner(json);
    let outcome = session.submit_user_turn(&prompt).await;
    spinner.finish_and_clear();
    let message = outcome?;

    if json {
        let out = serde_json::json!({
            "action": action,
            "prompt": prompt,
            "reply": message.content,
            "degraded": message.degraded,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    println!();
    println!("  {} {prompt}", console::style("You >").green().bold());
    println!();
    renderer.print_reply(&message.content, message.degraded);
    println!();
    Ok(())
}

//! Command router.
//!
//! Classifies a user turn before any model call. Slash commands are handled
//! here and always produce a reply; anything else returns `None` so the
//! session can run free-form generation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use moodbites_types::command::{CommandKind, CommandName};
use moodbites_types::error::RepositoryError;
use moodbites_types::llm::{AssistantReply, DegradeReason, Message};

use super::parser::{parse_invocation, parse_recipe_args};
use crate::llm::client::GenerationClient;
use crate::llm::prompt::{recipe_prompt, summary_prompt, FACT_PROMPT, MOTIVATE_PROMPT};
use crate::preference::store::PreferenceStore;
use crate::storage::kv_store::KvStore;
use crate::wellness::provider::WellnessDataProvider;

pub const RECIPE_USAGE_MESSAGE: &str = "Please list some ingredients, for example: \
/recipe tofu, broccoli, vegan";

pub const REMEMBER_USAGE_MESSAGE: &str = "Please specify what you want me to remember.";

pub const COMMAND_FAILED_MESSAGE: &str = "Sorry, something went wrong while handling that \
command. Please try again.";

/// Internal failure inside a command handler.
///
/// Never leaves the router: `route` turns it into an apology reply.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read wellness data: {0}")]
    WellnessData(#[source] RepositoryError),

    #[error("failed to save preference: {0}")]
    SavePreference(#[source] RepositoryError),
}

/// Routes slash commands to their handlers.
pub struct CommandRouter<K: KvStore, W: WellnessDataProvider> {
    client: Arc<GenerationClient>,
    preferences: Arc<PreferenceStore<K>>,
    wellness: W,
}

impl<K: KvStore, W: WellnessDataProvider> CommandRouter<K, W> {
    pub fn new(
        client: Arc<GenerationClient>,
        preferences: Arc<PreferenceStore<K>>,
        wellness: W,
    ) -> Self {
        Self {
            client,
            preferences,
            wellness,
        }
    }

    /// Handle `text` if it is a slash command.
    ///
    /// Returns `None` for text without a leading `/`. Unknown commands get
    /// the help listing; handler failures get an apology. This never errors.
    pub async fn route(&self, text: &str) -> Option<AssistantReply> {
        let invocation = parse_invocation(text)?;

        let name = match invocation.kind {
            CommandKind::Known(name) => name,
            CommandKind::Unknown(token) => {
                debug!(command = %token, "unknown command");
                return Some(AssistantReply::generated(help_text(Some(&token))));
            }
        };

        debug!(command = %name, "dispatching command");
        match self.dispatch(name, &invocation.argument_text).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(command = %name, error = %e, "command handler failed");
                Some(AssistantReply::degraded(
                    COMMAND_FAILED_MESSAGE,
                    DegradeReason::CommandFailed,
                ))
            }
        }
    }

    async fn dispatch(
        &self,
        name: CommandName,
        argument_text: &str,
    ) -> Result<AssistantReply, CommandError> {
        match name {
            CommandName::Recipe => Ok(self.recipe(argument_text).await),
            CommandName::Summary => self.summary().await,
            CommandName::Fact => Ok(self.ask(FACT_PROMPT.to_string()).await),
            CommandName::Motivate => Ok(self.ask(MOTIVATE_PROMPT.to_string()).await),
            CommandName::Remember => self.remember(argument_text).await,
            CommandName::Preferences => Ok(self.list_preferences().await),
        }
    }

    async fn ask(&self, prompt: String) -> AssistantReply {
        self.client.generate(vec![Message::user(prompt)]).await
    }

    async fn recipe(&self, argument_text: &str) -> AssistantReply {
        let args = parse_recipe_args(argument_text);
        if args.ingredients.is_empty() {
            return AssistantReply::generated(RECIPE_USAGE_MESSAGE);
        }
        let preferences = self.preferences.get().await;
        self.ask(recipe_prompt(&args.ingredients, args.dietary, &preferences))
            .await
    }

    async fn summary(&self) -> Result<AssistantReply, CommandError> {
        let moods = self
            .wellness
            .mood_entries()
            .await
            .map_err(CommandError::WellnessData)?;
        let foods = self
            .wellness
            .food_entries()
            .await
            .map_err(CommandError::WellnessData)?;
        debug!(moods = moods.len(), foods = foods.len(), "building summary prompt");
        Ok(self.ask(summary_prompt(&moods, &foods)).await)
    }

    async fn remember(&self, argument_text: &str) -> Result<AssistantReply, CommandError> {
        let fact = argument_text.trim();
        if fact.is_empty() {
            return Ok(AssistantReply::generated(REMEMBER_USAGE_MESSAGE));
        }
        self.preferences
            .add(fact)
            .await
            .map_err(CommandError::SavePreference)?;
        Ok(AssistantReply::generated(format!(
            "Got it! I'll remember: {fact}"
        )))
    }

    async fn list_preferences(&self) -> AssistantReply {
        let preferences = self.preferences.get().await;
        let listing = if preferences.is_empty() {
            "None saved.".to_string()
        } else {
            preferences.join(", ")
        };
        AssistantReply::generated(format!("Your preferences: {listing}"))
    }
}

/// Listing of every command, optionally led by an "unknown command" line.
pub fn help_text(unknown: Option<&str>) -> String {
    let mut text = String::new();
    if let Some(token) = unknown {
        text.push_str(&format!("I don't know the command `{token}`.\n\n"));
    }
    text.push_str("Available commands:\n");
    for name in CommandName::ALL {
        text.push_str(&format!("- `{}`: {}\n", name.usage(), name.description()));
    }
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::provider::LlmProvider;
    use crate::storage::kv_store::MemoryKvStore;
    use crate::wellness::provider::StaticWellnessData;
    use chrono::Utc;
    use moodbites_types::config::AssistantConfig;
    use moodbites_types::llm::{GenerationRequest, GenerationResponse, LlmError};
    use moodbites_types::wellness::{FoodEntry, MealType, MoodEntry};
    use std::future::Future;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Echoes the latest user turn and records every request.
    struct EchoProvider {
        requests: Arc<Mutex<Vec<GenerationRequest>>>,
    }

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn generate(
            &self,
            request: &GenerationRequest,
        ) -> impl Future<Output = Result<GenerationResponse, LlmError>> + Send {
            self.requests.lock().unwrap().push(request.clone());
            let text = request.latest_user_content().to_string();
            async move {
                Ok(GenerationResponse {
                    text,
                    model: "echo".to_string(),
                    finish_reason: None,
                })
            }
        }
    }

    struct FailingWellness;

    impl WellnessDataProvider for FailingWellness {
        async fn mood_entries(&self) -> Result<Vec<MoodEntry>, RepositoryError> {
            Err(RepositoryError::Connection)
        }

        async fn food_entries(&self) -> Result<Vec<FoodEntry>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    type Requests = Arc<Mutex<Vec<GenerationRequest>>>;

    fn router_with<W: WellnessDataProvider>(
        wellness: W,
    ) -> (CommandRouter<MemoryKvStore, W>, Requests) {
        let requests: Requests = Arc::new(Mutex::new(Vec::new()));
        let provider = EchoProvider {
            requests: requests.clone(),
        };
        let client = Arc::new(GenerationClient::new(
            Some(BoxLlmProvider::new(provider)),
            &AssistantConfig::default(),
        ));
        let preferences = Arc::new(PreferenceStore::new(MemoryKvStore::new()));
        (CommandRouter::new(client, preferences, wellness), requests)
    }

    fn router() -> (CommandRouter<MemoryKvStore, StaticWellnessData>, Requests) {
        router_with(StaticWellnessData::default())
    }

    #[tokio::test]
    async fn test_plain_text_is_not_routed() {
        let (router, requests) = router();
        assert!(router.route("how do I sleep better?").await.is_none());
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_returns_help() {
        let (router, requests) = router();
        let reply = router.route("/frobnicate").await.unwrap();
        assert!(reply.text.contains("/frobnicate"));
        assert!(reply.text.contains("Available commands"));
        assert!(reply.text.contains("/recipe"));
        assert!(!reply.degraded);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recipe_builds_prompt() {
        let (router, requests) = router();
        let reply = router.route("/recipe tofu, broccoli, vegan").await.unwrap();
        assert!(!reply.degraded);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let prompt = requests[0].latest_user_content();
        assert!(prompt.contains("tofu, broccoli."));
        assert!(prompt.contains("Dietary restrictions: vegan"));
    }

    #[tokio::test]
    async fn test_recipe_without_ingredients_skips_generation() {
        let (router, requests) = router();
        let reply = router.route("/recipe").await.unwrap();
        assert_eq!(reply.text, RECIPE_USAGE_MESSAGE);

        let reply = router.route("/recipe vegan").await.unwrap();
        assert_eq!(reply.text, RECIPE_USAGE_MESSAGE);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recipe_includes_preferences() {
        let (router, requests) = router();
        router.route("/remember I hate cilantro").await.unwrap();
        router.route("/recipe rice, beans").await.unwrap();
        let requests = requests.lock().unwrap();
        assert!(requests[0].latest_user_content().contains("I hate cilantro"));
    }

    #[tokio::test]
    async fn test_remember_is_idempotent() {
        let (router, requests) = router();
        let first = router.route("/remember I am vegetarian").await.unwrap();
        let second = router.route("/remember I am vegetarian").await.unwrap();
        assert_eq!(first.text, "Got it! I'll remember: I am vegetarian");
        assert_eq!(second.text, first.text);
        assert_eq!(router.preferences.get().await.len(), 1);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remember_without_text() {
        let (router, _) = router();
        let reply = router.route("/remember   ").await.unwrap();
        assert_eq!(reply.text, REMEMBER_USAGE_MESSAGE);
        assert!(router.preferences.is_empty().await);
    }

    #[tokio::test]
    async fn test_preferences_listing() {
        let (router, _) = router();
        let empty = router.route("/preferences").await.unwrap();
        assert_eq!(empty.text, "Your preferences: None saved.");

        router.route("/remember I am vegetarian").await.unwrap();
        router.route("/REMEMBER I love mangoes").await.unwrap();
        let listed = router.route("/preferences").await.unwrap();
        assert_eq!(
            listed.text,
            "Your preferences: I am vegetarian, I love mangoes"
        );
    }

    #[tokio::test]
    async fn test_fact_and_motivate_ignore_arguments() {
        let (router, requests) = router();
        router.route("/fact about kale").await.unwrap();
        router.route("/Motivate").await.unwrap();
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].latest_user_content(), FACT_PROMPT);
        assert_eq!(requests[1].latest_user_content(), MOTIVATE_PROMPT);
    }

    #[tokio::test]
    async fn test_summary_reads_wellness_data() {
        let data = StaticWellnessData {
            moods: vec![MoodEntry {
                id: Uuid::now_v7(),
                mood: 3,
                note: Some("ok".to_string()),
                timestamp: Utc::now(),
            }],
            foods: vec![FoodEntry {
                id: Uuid::now_v7(),
                name: "Salmon".to_string(),
                calories: 450,
                meal_type: MealType::Dinner,
                timestamp: Utc::now(),
            }],
        };
        let (router, requests) = router_with(data);
        router.route("/summary ignored text").await.unwrap();
        let requests = requests.lock().unwrap();
        let prompt = requests[0].latest_user_content();
        assert!(prompt.contains("3 (neutral)"));
        assert!(prompt.contains("Salmon"));
    }

    #[tokio::test]
    async fn test_handler_failure_becomes_apology() {
        let (router, requests) = router_with(FailingWellness);
        let reply = router.route("/summary").await.unwrap();
        assert_eq!(reply.text, COMMAND_FAILED_MESSAGE);
        assert_eq!(reply.reason, Some(DegradeReason::CommandFailed));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_help_text_lists_every_command() {
        let help = help_text(None);
        for name in CommandName::ALL {
            assert!(help.contains(&name.to_string()));
        }
        assert!(!help.contains("don't know"));
    }
}

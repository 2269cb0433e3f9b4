//! LLM provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait defined
//! in `moodbites-core`, and the factory that turns an [`AssistantConfig`]
//! plus an optional API key into a ready [`GenerationClient`].
//!
//! [`LlmProvider`]: moodbites_core::llm::provider::LlmProvider

pub mod gemini;

use secrecy::{ExposeSecret, SecretString};

use moodbites_core::llm::box_provider::BoxLlmProvider;
use moodbites_core::llm::client::GenerationClient;
use moodbites_types::config::AssistantConfig;
use moodbites_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] from the assistant configuration.
///
/// Returns `Ok(None)` when no usable key is supplied; the caller then runs
/// the assistant offline.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_provider(
    config: &AssistantConfig,
    api_key: Option<SecretString>,
) -> Result<Option<BoxLlmProvider>, LlmError> {
    let Some(key) = api_key.filter(|k| !k.expose_secret().trim().is_empty()) else {
        return Ok(None);
    };

    let provider = GeminiProvider::new(
        key,
        config.model.clone(),
        config.request_timeout(),
    )?
    .with_base_url(config.base_url.clone());

    Ok(Some(BoxLlmProvider::new(provider)))
}

/// Build the generation client, degrading to offline mode on any
/// provider construction failure.
pub fn build_generation_client(
    config: &AssistantConfig,
    api_key: Option<SecretString>,
) -> GenerationClient {
    match create_provider(config, api_key) {
        Ok(Some(provider)) => {
            tracing::info!(provider = provider.name(), model = %config.model, "generation provider ready");
            GenerationClient::new(Some(provider), config)
        }
        Ok(None) => {
            tracing::warn!(
                env = %config.api_key_env,
                "no API key configured, answers will come from the offline responder"
            );
            GenerationClient::offline(config)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create generation provider, running offline");
            GenerationClient::offline(config)
        }
    }
}

//! Global configuration types for MoodBites.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default so an empty or partial file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::GenerationParams;

/// Shortest per-attempt timeout; a zero timeout would fail every call.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Top-level configuration.
///
/// Loaded from `~/.moodbites/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Settings for the conversational assistant and its generation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the model endpoint, without the `/{model}:generateContent` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Retries after the first attempt for rate-limit, server and network failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,

    /// Fixed delay before the single retry of an empty response.
    #[serde(default = "default_empty_retry_delay_ms")]
    pub empty_retry_delay_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of prior transcript messages sent with each free-form turn.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Reply language as a short code ("en", "es", ...).
    #[serde(default = "default_language")]
    pub language: String,

    /// Name used in the greeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Save the transcript to the key-value store after every turn.
    #[serde(default)]
    pub persist_transcript: bool,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    500
}

fn default_top_p() -> f64 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_retry_max_delay_ms() -> u64 {
    8000
}

fn default_empty_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_window_size() -> usize {
    5
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            empty_retry_delay_ms: default_empty_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            window_size: default_window_size(),
            language: default_language(),
            user_name: None,
            persist_transcript: false,
        }
    }
}

impl AssistantConfig {
    /// Sampling parameters for every generation request.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
        }
    }

    /// Per-attempt timeout, never shorter than [`MIN_REQUEST_TIMEOUT_SECS`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }
}

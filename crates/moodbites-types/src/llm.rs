//! LLM request/response types for MoodBites.
//!
//! These types model the data shapes for the language-model seam: the
//! role-tagged turns sent to a provider, the generation parameters, the
//! classified provider failures, and the tagged reply the assistant hands
//! back to the conversation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single role-tagged turn sent to an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters attached to every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Nucleus sampling probability mass.
    pub top_p: f64,
    /// Nucleus sampling candidate count.
    pub top_k: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 500,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// One unit of work for a provider: ordered turns plus parameters.
///
/// The first turn may be a synthesized `System` directive; providers map it
/// to whatever their wire format expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub turns: Vec<Message>,
    pub params: GenerationParams,
}

impl GenerationRequest {
    /// Content of the most recent user turn, or an empty string.
    pub fn latest_user_content(&self) -> &str {
        self.turns
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// Successful provider response.
///
/// `text` may be empty when the provider returned a 2xx with no candidate
/// text; the generation client treats that as a retryable condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Classified failures from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("authentication failed (HTTP {status})")]
    AuthenticationFailed { status: u16 },

    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    #[error("unexpected HTTP status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl LlmError {
    /// Map a non-2xx HTTP status to its error class.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => LlmError::BadRequest(body),
            401 | 403 => LlmError::AuthenticationFailed { status },
            429 => LlmError::RateLimited,
            s if s >= 500 => LlmError::Server { status: s },
            s => LlmError::UnexpectedStatus {
                status: s,
                message: body,
            },
        }
    }

    /// Whether the error is worth another attempt with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited
                | LlmError::Server { .. }
                | LlmError::Network(_)
                | LlmError::Timeout(_)
        )
    }
}

/// Why an assistant reply did not come from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeReason {
    /// No credential configured; canned answer used.
    NoCredential,
    /// Retries exhausted on HTTP 429.
    RateLimited,
    /// Retries exhausted on HTTP 5xx.
    ServerError,
    /// HTTP 400.
    BadRequest,
    /// HTTP 401/403.
    Unauthorized,
    /// Provider kept returning no text.
    EmptyResponse,
    /// Network failure, timeout or unclassified error; canned answer used.
    Unavailable,
    /// A command handler failed internally.
    CommandFailed,
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::NoCredential => write!(f, "no_credential"),
            DegradeReason::RateLimited => write!(f, "rate_limited"),
            DegradeReason::ServerError => write!(f, "server_error"),
            DegradeReason::BadRequest => write!(f, "bad_request"),
            DegradeReason::Unauthorized => write!(f, "unauthorized"),
            DegradeReason::EmptyResponse => write!(f, "empty_response"),
            DegradeReason::Unavailable => write!(f, "unavailable"),
            DegradeReason::CommandFailed => write!(f, "command_failed"),
        }
    }
}

/// Text handed back to the conversation layer, tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DegradeReason>,
}

impl AssistantReply {
    /// A reply produced by the model (or by a local command with no model call).
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: false,
            reason: None,
        }
    }

    /// A canned or error reply standing in for model output.
    pub fn degraded(text: impl Into<String>, reason: DegradeReason) -> Self {
        Self {
            text: text.into(),
            degraded: true,
            reason: Some(reason),
        }
    }
}

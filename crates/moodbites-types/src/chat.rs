//! Chat transcript types for MoodBites.
//!
//! A transcript is an append-only list of `ChatMessage`s. Messages are never
//! edited after creation; conversational order is append order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

use crate::llm::{AssistantReply, Message};

/// A single turn in the conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Set on assistant messages that carry canned or error text instead of
    /// model output, so the UI can mark them.
    #[serde(default)]
    pub degraded: bool,
}

impl ChatMessage {
    fn new(role: MessageRole, content: String, degraded: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content,
            timestamp: Utc::now(),
            degraded,
        }
    }

    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), false)
    }

    /// An assistant turn built from a tagged reply.
    pub fn assistant(reply: AssistantReply) -> Self {
        Self::new(MessageRole::Assistant, reply.text, reply.degraded)
    }

    /// The role/content pair sent to a provider.
    pub fn to_llm_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

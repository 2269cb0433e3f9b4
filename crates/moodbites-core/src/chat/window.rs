//! Per-turn conversation window.
//!
//! The window is the slice of transcript sent with a free-form turn: an
//! optional directive, the trailing `size` prior messages, then the current
//! user text. It is rebuilt from the transcript every turn and never stored.

use moodbites_types::chat::ChatMessage;
use moodbites_types::llm::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWindow {
    directive: Option<Message>,
    history: Vec<Message>,
    current: Message,
}

impl ConversationWindow {
    /// Build a window from the transcript as it stood before `current`
    /// was submitted.
    pub fn build(
        prior: &[ChatMessage],
        size: usize,
        directive: Option<String>,
        current: &str,
    ) -> Self {
        let start = prior.len().saturating_sub(size);
        Self {
            directive: directive.map(Message::system),
            history: prior[start..].iter().map(ChatMessage::to_llm_message).collect(),
            current: Message::user(current),
        }
    }

    /// Total number of turns, directive included.
    pub fn turn_count(&self) -> usize {
        self.history.len() + 1 + usize::from(self.directive.is_some())
    }

    /// Turns in send order.
    pub fn into_turns(self) -> Vec<Message> {
        let mut turns = Vec::with_capacity(self.turn_count());
        turns.extend(self.directive);
        turns.extend(self.history);
        turns.push(self.current);
        turns
    }
}

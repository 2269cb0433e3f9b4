//! Conversation session.
//!
//! Owns the transcript and the turn lifecycle: one outstanding turn at a
//! time, exactly one assistant message appended per accepted turn, and a
//! greeting-seeded reset that leaves remembered preferences alone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use moodbites_types::chat::ChatMessage;
use moodbites_types::config::AssistantConfig;
use moodbites_types::error::{RepositoryError, SubmitRejection};
use moodbites_types::llm::AssistantReply;

use super::window::ConversationWindow;
use crate::command::router::CommandRouter;
use crate::llm::client::GenerationClient;
use crate::llm::prompt::chat_directive;
use crate::preference::store::PreferenceStore;
use crate::storage::kv_store::{KvStore, TRANSCRIPT_KEY};
use crate::wellness::provider::WellnessDataProvider;

/// Opening assistant message for a fresh transcript.
pub fn greeting(user_name: Option<&str>) -> String {
    let name = user_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("there");
    format!(
        "Hi {name}! I'm your AI nutrition and mood coach. I can help you understand how food \
         affects your emotions, suggest meals based on your mood, and provide personalized \
         insights. What would you like to know?"
    )
}

struct SessionState {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    /// Bumped by every clear; a turn only appends to the epoch it started in.
    epoch: u64,
}

/// Clears the in-flight flag when a turn ends, including when its future is
/// dropped mid-await.
struct TurnGuard<'a> {
    state: &'a Mutex<SessionState>,
    epoch: u64,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.epoch == self.epoch {
            state.in_flight = false;
        }
    }
}

/// A single conversation with the assistant.
pub struct ConversationSession<K: KvStore, W: WellnessDataProvider> {
    router: CommandRouter<K, W>,
    client: Arc<GenerationClient>,
    preferences: Arc<PreferenceStore<K>>,
    /// Present only when transcript persistence is enabled.
    transcript_kv: Option<K>,
    window_size: usize,
    language: String,
    user_name: Option<String>,
    state: Mutex<SessionState>,
    /// Serializes transcript writes so a stale snapshot never lands after a
    /// newer one.
    persist_lock: tokio::sync::Mutex<()>,
}

impl<K: KvStore, W: WellnessDataProvider> ConversationSession<K, W> {
    pub fn new(
        client: Arc<GenerationClient>,
        preferences: Arc<PreferenceStore<K>>,
        wellness: W,
        config: &AssistantConfig,
    ) -> Self {
        let router = CommandRouter::new(client.clone(), preferences.clone(), wellness);
        let greeting = ChatMessage::assistant(AssistantReply::generated(greeting(
            config.user_name.as_deref(),
        )));
        Self {
            router,
            client,
            preferences,
            transcript_kv: None,
            window_size: config.window_size,
            language: config.language.clone(),
            user_name: config.user_name.clone(),
            state: Mutex::new(SessionState {
                messages: vec![greeting],
                in_flight: false,
                epoch: 0,
            }),
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Save the transcript to `kv` after every turn and clear.
    pub fn with_transcript_store(mut self, kv: K) -> Self {
        self.transcript_kv = Some(kv);
        self
    }

    /// Replace the seeded transcript with the persisted one, if any.
    ///
    /// Returns the number of restored messages. A missing or empty stored
    /// transcript leaves the greeting in place.
    pub async fn restore_transcript(&self) -> Result<usize, RepositoryError> {
        let Some(kv) = &self.transcript_kv else {
            return Ok(0);
        };
        let Some(value) = kv.get(TRANSCRIPT_KEY).await? else {
            return Ok(0);
        };
        let messages: Vec<ChatMessage> =
            serde_json::from_value(value).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
        if messages.is_empty() {
            return Ok(0);
        }

        let count = messages.len();
        self.lock_state().messages = messages;
        debug!(count, "restored transcript");
        Ok(count)
    }

    /// Submit one user turn and wait for the assistant's reply.
    ///
    /// Rejects blank input and any submission made while another turn is
    /// outstanding; neither appends a message. An accepted turn appends the
    /// user message immediately and the assistant message on completion,
    /// unless the session was cleared in between.
    pub async fn submit_user_turn(&self, text: &str) -> Result<ChatMessage, SubmitRejection> {
        let content = text.trim();
        if content.is_empty() {
            return Err(SubmitRejection::EmptyInput);
        }

        let (prior, epoch) = {
            let mut state = self.lock_state();
            if state.in_flight {
                debug!("turn rejected, another is in flight");
                return Err(SubmitRejection::TurnInFlight);
            }
            state.in_flight = true;
            let prior = state.messages.clone();
            state.messages.push(ChatMessage::user(content));
            (prior, state.epoch)
        };
        let _guard = TurnGuard {
            state: &self.state,
            epoch,
        };

        let reply = match self.router.route(content).await {
            Some(reply) => reply,
            None => self.free_form(&prior, content).await,
        };
        if reply.degraded {
            info!(reason = ?reply.reason, "assistant reply degraded");
        }
        let message = ChatMessage::assistant(reply);

        let snapshot = {
            let mut state = self.lock_state();
            if state.epoch == epoch {
                state.messages.push(message.clone());
                Some(state.messages.clone())
            } else {
                debug!("session cleared during turn, reply not appended");
                None
            }
        };
        if let Some(messages) = snapshot {
            self.persist(&messages, epoch).await;
        }

        Ok(message)
    }

    /// Reset the transcript to a single greeting.
    ///
    /// Clears the in-flight flag; remembered preferences are untouched.
    pub async fn clear_session(&self) {
        let (snapshot, epoch) = {
            let mut state = self.lock_state();
            state.epoch += 1;
            state.in_flight = false;
            state.messages = vec![self.greeting_message()];
            (state.messages.clone(), state.epoch)
        };
        info!("session cleared");
        self.persist(&snapshot, epoch).await;
    }

    /// Snapshot of the transcript in append order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock_state().messages.clone()
    }

    /// Whether a turn is outstanding.
    pub fn is_busy(&self) -> bool {
        self.lock_state().in_flight
    }

    pub fn preferences(&self) -> &PreferenceStore<K> {
        &self.preferences
    }

    pub fn client(&self) -> &GenerationClient {
        &self.client
    }

    async fn free_form(&self, prior: &[ChatMessage], content: &str) -> AssistantReply {
        let preferences = self.preferences.get().await;
        let directive = chat_directive(&preferences, &self.language);
        let window = ConversationWindow::build(prior, self.window_size, directive, content);
        debug!(turns = window.turn_count(), "sending free-form turn");
        self.client.generate(window.into_turns()).await
    }

    /// Save a snapshot taken in `epoch`. Skipped when a clear has started a
    /// newer epoch since the snapshot was taken.
    async fn persist(&self, messages: &[ChatMessage], epoch: u64) {
        let Some(kv) = &self.transcript_kv else {
            return;
        };
        let value = match serde_json::to_value(messages) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to serialize transcript");
                return;
            }
        };

        let _write = self.persist_lock.lock().await;
        let current = self.lock_state().epoch;
        if current != epoch {
            debug!("transcript snapshot superseded by a clear, not saved");
            return;
        }
        if let Err(e) = kv.set(TRANSCRIPT_KEY, &value).await {
            warn!(error = %e, "failed to persist transcript");
        }
    }

    fn greeting_message(&self) -> ChatMessage {
        ChatMessage::assistant(AssistantReply::generated(greeting(
            self.user_name.as_deref(),
        )))
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Resilient generation client.
//!
//! Wraps one optional `BoxLlmProvider` with a per-call timeout, bounded
//! retry with exponential backoff, HTTP status classification and the
//! fallback responder. Every path ends in an `AssistantReply`; nothing the
//! provider does can surface as an error to the caller.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use moodbites_types::config::AssistantConfig;
use moodbites_types::llm::{
    AssistantReply, DegradeReason, GenerationParams, GenerationRequest, LlmError, Message,
};

use super::box_provider::BoxLlmProvider;
use super::fallback::FallbackResponder;
use super::retry::RetryPolicy;

pub const RATE_LIMITED_MESSAGE: &str = "I'm receiving a lot of requests right now. \
Please wait a moment and try again.";

pub const SERVER_ERROR_MESSAGE: &str = "The AI service is having trouble at the moment. \
Please try again in a little while.";

pub const BAD_REQUEST_MESSAGE: &str = "I couldn't process that request. \
Could you try rephrasing your question?";

pub const UNAUTHORIZED_MESSAGE: &str = "I can't reach the AI service because the API key \
is invalid or lacks permission. Please check your Gemini API configuration.";

pub const EMPTY_RESPONSE_MESSAGE: &str = "I didn't get a usable response that time. \
Please try rephrasing your question.";

/// Performs one generation per call and folds every failure into a reply.
///
/// Holds no per-request mutable state, so `&self` calls may run concurrently.
#[derive(Debug)]
pub struct GenerationClient {
    /// `None` means no credential is configured: offline mode.
    provider: Option<BoxLlmProvider>,
    model: String,
    params: GenerationParams,
    retry: RetryPolicy,
    empty_retry_delay: Duration,
    request_timeout: Duration,
}

impl GenerationClient {
    pub fn new(provider: Option<BoxLlmProvider>, config: &AssistantConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            params: config.generation_params(),
            retry: RetryPolicy::from_config(config),
            empty_retry_delay: Duration::from_millis(config.empty_retry_delay_ms),
            request_timeout: config.request_timeout(),
        }
    }

    /// A client with no provider; every reply comes from the fallback responder.
    pub fn offline(config: &AssistantConfig) -> Self {
        Self::new(None, config)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a reply for the given turns.
    ///
    /// The first turn may be a `System` directive. The returned text is
    /// trimmed, and `degraded` is set on every path that did not produce
    /// model output.
    pub async fn generate(&self, turns: Vec<Message>) -> AssistantReply {
        let request = GenerationRequest {
            model: self.model.clone(),
            turns,
            params: self.params.clone(),
        };

        let Some(provider) = &self.provider else {
            debug!("no credential configured, answering offline");
            return Self::fallback(&request, DegradeReason::NoCredential);
        };

        let mut retries = 0u32;
        let mut empty_retried = false;

        loop {
            let attempt = retries + u32::from(empty_retried) + 1;
            debug!(provider = provider.name(), attempt, "sending generation request");

            let call = provider.generate(&request);
            let outcome = match tokio::time::timeout(self.request_timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout(self.request_timeout.as_millis() as u64)),
            };

            let err = match outcome {
                Ok(response) => {
                    let text = response.text.trim();
                    if !text.is_empty() {
                        info!(
                            provider = provider.name(),
                            model = %response.model,
                            attempt,
                            "generation succeeded"
                        );
                        return AssistantReply::generated(text);
                    }
                    LlmError::EmptyResponse
                }
                Err(err) => err,
            };

            match err {
                LlmError::EmptyResponse | LlmError::Deserialization(_) => {
                    if empty_retried {
                        warn!(error = %err, "provider returned no usable text after retry");
                        return AssistantReply::degraded(
                            EMPTY_RESPONSE_MESSAGE,
                            DegradeReason::EmptyResponse,
                        );
                    }
                    empty_retried = true;
                    warn!(
                        error = %err,
                        delay_ms = self.empty_retry_delay.as_millis() as u64,
                        "provider returned no usable text, retrying once"
                    );
                    tokio::time::sleep(self.empty_retry_delay).await;
                }
                err if err.is_retryable() => {
                    if !self.retry.should_retry(retries) {
                        warn!(error = %err, retries, "retries exhausted");
                        return Self::exhausted(&err, &request);
                    }
                    let delay = self.retry.delay_for(retries);
                    retries += 1;
                    warn!(
                        error = %err,
                        retry = retries,
                        delay_ms = delay.as_millis() as u64,
                        "transient generation failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                LlmError::BadRequest(body) => {
                    warn!(body = %body, "provider rejected request");
                    return AssistantReply::degraded(BAD_REQUEST_MESSAGE, DegradeReason::BadRequest);
                }
                LlmError::AuthenticationFailed { status } => {
                    error!(status, "provider rejected credential");
                    return AssistantReply::degraded(
                        UNAUTHORIZED_MESSAGE,
                        DegradeReason::Unauthorized,
                    );
                }
                other => {
                    error!(error = %other, "unclassified generation failure, answering offline");
                    return Self::fallback(&request, DegradeReason::Unavailable);
                }
            }
        }
    }

    /// Reply once the retry budget is spent on a transient failure.
    fn exhausted(err: &LlmError, request: &GenerationRequest) -> AssistantReply {
        match err {
            LlmError::RateLimited => {
                AssistantReply::degraded(RATE_LIMITED_MESSAGE, DegradeReason::RateLimited)
            }
            LlmError::Server { .. } => {
                AssistantReply::degraded(SERVER_ERROR_MESSAGE, DegradeReason::ServerError)
            }
            _ => Self::fallback(request, DegradeReason::Unavailable),
        }
    }

    fn fallback(request: &GenerationRequest, reason: DegradeReason) -> AssistantReply {
        AssistantReply::degraded(
            FallbackResponder::respond(request.latest_user_content()),
            reason,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LlmProvider;
    use moodbites_types::llm::GenerationResponse;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    // --- Scripted provider ---

    enum Step {
        Text(&'static str),
        Status(u16),
        Network,
        Hang,
    }

    struct ScriptedProvider {
        steps: Mutex<VecDeque<Step>>,
        calls: Arc<AtomicU32>,
        last_request: Arc<Mutex<Option<GenerationRequest>>>,
    }

    impl ScriptedProvider {
        fn new(steps: Vec<Step>) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            let provider = Self {
                steps: Mutex::new(steps.into()),
                calls: calls.clone(),
                last_request: Arc::new(Mutex::new(None)),
            };
            (provider, calls)
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(
            &self,
            request: &GenerationRequest,
        ) -> impl Future<Output = Result<GenerationResponse, LlmError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            let step = self.steps.lock().unwrap().pop_front().unwrap_or(Step::Status(500));
            async move {
                match step {
                    Step::Text(text) => Ok(GenerationResponse {
                        text: text.to_string(),
                        model: "scripted-model".to_string(),
                        finish_reason: None,
                    }),
                    Step::Status(status) => Err(LlmError::from_status(status, "boom".to_string())),
                    Step::Network => Err(LlmError::Network("connection reset".to_string())),
                    Step::Hang => std::future::pending().await,
                }
            }
        }
    }

    fn client_with(steps: Vec<Step>) -> (GenerationClient, Arc<AtomicU32>) {
        let (provider, calls) = ScriptedProvider::new(steps);
        let client = GenerationClient::new(
            Some(BoxLlmProvider::new(provider)),
            &AssistantConfig::default(),
        );
        (client, calls)
    }

    fn turns(text: &str) -> Vec<Message> {
        vec![Message::user(text)]
    }

    #[tokio::test]
    async fn test_offline_uses_fallback_without_delay() {
        let client = GenerationClient::offline(&AssistantConfig::default());
        assert!(client.is_offline());
        let start = std::time::Instant::now();
        let reply = client.generate(turns("I feel tired")).await;
        assert!(start.elapsed() < Duration::from_millis(100));
        assert!(reply.degraded);
        assert_eq!(reply.reason, Some(DegradeReason::NoCredential));
        assert!(reply.text.contains("energy boost"));
    }

    #[tokio::test]
    async fn test_offline_uses_latest_user_turn() {
        let client = GenerationClient::offline(&AssistantConfig::default());
        let reply = client
            .generate(vec![
                Message::system("directive mentioning stress"),
                Message::user("I'm anxious"),
                Message::assistant("old reply about energy"),
            ])
            .await;
        assert!(reply.text.contains("calming foods"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_trimmed() {
        let (client, calls) = client_with(vec![Step::Text("  Eat more greens.\n")]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(reply.text, "Eat more greens.");
        assert!(!reply.degraded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_errors_retry_with_increasing_delay() {
        let (client, calls) =
            client_with(vec![Step::Status(500), Step::Status(500), Step::Status(500)]);
        let start = Instant::now();
        let reply = client.generate(turns("hi")).await;

        // 1 attempt + 2 retries, waiting 1s then 2s
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        assert!(reply.degraded);
        assert_eq!(reply.reason, Some(DegradeReason::ServerError));
        assert_eq!(reply.text, SERVER_ERROR_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_exhaustion_message() {
        let (client, calls) =
            client_with(vec![Step::Status(429), Step::Status(429), Step::Status(429)]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(reply.reason, Some(DegradeReason::RateLimited));
        assert_eq!(reply.text, RATE_LIMITED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failure() {
        let (client, calls) = client_with(vec![Step::Status(503), Step::Text("Recovered")]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(reply, AssistantReply::generated("Recovered"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_does_not_retry() {
        let (client, calls) = client_with(vec![Step::Status(401), Step::Text("never")]);
        let start = Instant::now();
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(reply.reason, Some(DegradeReason::Unauthorized));
        assert_eq!(reply.text, UNAUTHORIZED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forbidden_is_auth_failure() {
        let (client, calls) = client_with(vec![Step::Status(403)]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reply.reason, Some(DegradeReason::Unauthorized));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_request_does_not_retry() {
        let (client, calls) = client_with(vec![Step::Status(400)]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reply.text, BAD_REQUEST_MESSAGE);
        assert_eq!(reply.reason, Some(DegradeReason::BadRequest));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_status_falls_back() {
        let (client, calls) = client_with(vec![Step::Status(404)]);
        let reply = client.generate(turns("my mood")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reply.reason, Some(DegradeReason::Unavailable));
        assert!(reply.text.contains("serotonin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_response_retries_once() {
        let (client, calls) = client_with(vec![Step::Text("   "), Step::Text("")]);
        let start = Instant::now();
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert_eq!(reply.text, EMPTY_RESPONSE_MESSAGE);
        assert_eq!(reply.reason, Some(DegradeReason::EmptyResponse));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_then_text_succeeds() {
        let (client, _calls) = client_with(vec![Step::Text(""), Step::Text("Second try")]);
        let reply = client.generate(turns("hi")).await;
        assert_eq!(reply, AssistantReply::generated("Second try"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_falls_back_after_retries() {
        let (client, calls) =
            client_with(vec![Step::Network, Step::Network, Step::Network]);
        let reply = client.generate(turns("stress")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(reply.reason, Some(DegradeReason::Unavailable));
        assert!(reply.text.contains("calming foods"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_network_failure() {
        let (provider, calls) = ScriptedProvider::new(vec![Step::Hang, Step::Text("late but fine")]);
        let client = GenerationClient::new(
            Some(BoxLlmProvider::new(provider)),
            &AssistantConfig::default(),
        )
        .with_timeout(Duration::from_secs(5));

        let start = Instant::now();
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // 5s timeout + 1s backoff
        assert_eq!(start.elapsed(), Duration::from_secs(6));
        assert_eq!(reply.text, "late but fine");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_retry_policy() {
        let (client, calls) = client_with(vec![Step::Status(500), Step::Status(500)]);
        let client = client.with_retry_policy(RetryPolicy::new(
            0,
            Duration::from_millis(10),
            Duration::from_millis(10),
        ));
        let reply = client.generate(turns("hi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reply.reason, Some(DegradeReason::ServerError));
    }

    #[tokio::test]
    async fn test_request_carries_config() {
        let (provider, _calls) = ScriptedProvider::new(vec![Step::Text("ok")]);
        let seen = provider.last_request.clone();
        let config = AssistantConfig {
            model: "gemini-test".to_string(),
            temperature: 0.3,
            ..AssistantConfig::default()
        };
        let client = GenerationClient::new(Some(BoxLlmProvider::new(provider)), &config);
        assert_eq!(client.provider_name(), Some("scripted"));
        client.generate(turns("hello")).await;

        let request = seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gemini-test");
        assert!((request.params.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(request.turns, vec![Message::user("hello")]);
    }
}

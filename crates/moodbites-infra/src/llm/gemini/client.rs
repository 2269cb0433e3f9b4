//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends non-streaming requests to `{base_url}/{model}:generateContent`.
//! The API key travels as the `key` query parameter, is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use moodbites_core::llm::provider::LlmProvider;
use moodbites_types::llm::{
    GenerationRequest, GenerationResponse, LlmError, Message, MessageRole,
};

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
};

/// Default REST endpoint for Gemini models.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// `timeout` bounds each HTTP exchange; the generation client applies
    /// its own deadline on top.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            timeout,
        })
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint for a model, without the key parameter.
    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: to_gemini_contents(&request.turns),
            generation_config: GeminiGenerationConfig {
                temperature: request.params.temperature,
                max_output_tokens: request.params.max_output_tokens,
                top_p: request.params.top_p,
                top_k: request.params.top_k,
            },
        }
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Gemini wire role for a conversation role.
///
/// Gemini only knows "user" and "model"; a system directive is sent as a
/// user turn at the head of the conversation.
pub fn gemini_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::Assistant => "model",
        MessageRole::User | MessageRole::System => "user",
    }
}

/// Map role-tagged turns to Gemini `contents`, preserving order.
pub fn to_gemini_contents(turns: &[Message]) -> Vec<GeminiContent> {
    turns
        .iter()
        .map(|m| GeminiContent {
            role: Some(gemini_role(m.role).to_string()),
            parts: vec![GeminiPart {
                text: Some(m.content.clone()),
            }],
        })
        .collect()
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_gemini_request(request);

        tracing::debug!(model, turns = body.contents.len(), "sending Gemini request");

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    // Strip the URL: it carries the key.
                    LlmError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Gemini returned error status");
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(e.without_url().to_string()))?;

        Ok(GenerationResponse {
            text: parsed.first_text(),
            model: parsed.model_version.clone().unwrap_or_else(|| model.to_string()),
            finish_reason: parsed.finish_reason(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodbites_types::llm::GenerationParams;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn test_request(turns: Vec<Message>) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-1.5-flash".to_string(),
            turns,
            params: GenerationParams::default(),
        }
    }

    fn test_provider(base_url: &str) -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key".to_string()),
            "gemini-1.5-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url)
    }

    /// Captured request line and body from the mock server.
    struct Captured {
        request_line: String,
        body: serde_json::Value,
    }

    /// Serve exactly one HTTP exchange on a local port with a canned reply.
    async fn one_shot_server(
        status: u16,
        body: &'static str,
    ) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            // Read until the header block is complete, then the full body.
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
            }

            let reply = format!(
                "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let _ = tx.send(Captured {
                request_line: head.lines().next().unwrap_or_default().to_string(),
                body: serde_json::from_slice(&buf[header_end..]).unwrap_or_default(),
            });
        });

        (format!("http://{addr}/v1beta/models"), rx)
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(gemini_role(MessageRole::User), "user");
        assert_eq!(gemini_role(MessageRole::System), "user");
        assert_eq!(gemini_role(MessageRole::Assistant), "model");
    }

    #[test]
    fn test_contents_preserve_order() {
        let contents = to_gemini_contents(&[
            Message::system("Always respond in Spanish."),
            Message::user("hola"),
            Message::assistant("¡Hola!"),
            Message::user("what should I eat?"),
        ]);
        let roles: Vec<_> = contents.iter().map(|c| c.role.as_deref().unwrap()).collect();
        assert_eq!(roles, vec!["user", "user", "model", "user"]);
        assert_eq!(contents[3].parts[0].text.as_deref(), Some("what should I eat?"));
    }

    #[test]
    fn test_endpoint_and_base_url_override() {
        let provider = test_provider("http://localhost:9999/models/");
        assert_eq!(
            provider.endpoint("gemini-1.5-flash"),
            "http://localhost:9999/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = test_provider(DEFAULT_BASE_URL);
        let debug = format!("{provider:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-key"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (base, captured) = one_shot_server(
            200,
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Try a banana."}]},"finishReason":"STOP"}],"modelVersion":"gemini-1.5-flash-002"}"#,
        )
        .await;
        let provider = test_provider(&base);

        let response = provider
            .generate(&test_request(vec![
                Message::system("You are a friendly AI nutrition and mood coach."),
                Message::user("I'm tired"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.text, "Try a banana.");
        assert_eq!(response.model, "gemini-1.5-flash-002");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));

        let captured = captured.await.unwrap();
        assert!(captured.request_line.starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent?key=test-key"));
        assert_eq!(captured.body["contents"][0]["role"], "user");
        assert_eq!(captured.body["contents"][1]["parts"][0]["text"], "I'm tired");
        assert_eq!(captured.body["generationConfig"]["maxOutputTokens"], 500);
    }

    #[tokio::test]
    async fn test_generate_empty_candidates_yields_empty_text() {
        let (base, _captured) = one_shot_server(200, r#"{"candidates":[]}"#).await;
        let provider = test_provider(&base);

        let response = provider
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap();
        assert!(response.text.is_empty());
        assert_eq!(response.model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_generate_classifies_status() {
        let (base, _captured) = one_shot_server(429, r#"{"error":{"code":429}}"#).await;
        let err = test_provider(&base)
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));

        let (base, _captured) = one_shot_server(403, r#"{"error":{"code":403}}"#).await;
        let err = test_provider(&base)
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed { status: 403 }));

        let (base, _captured) = one_shot_server(503, "{}").await;
        let err = test_provider(&base)
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Server { status: 503 }));
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let (base, _captured) = one_shot_server(200, "not json").await;
        let err = test_provider(&base)
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_generate_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = test_provider(&format!("http://{addr}"))
            .generate(&test_request(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
        assert!(!err.to_string().contains("test-key"));
    }
}

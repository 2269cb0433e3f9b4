//! LlmProvider trait definition.
//!
//! This is the single seam between the assistant and a remote language
//! model. Uses RPITIT for `generate`.

use moodbites_types::llm::{GenerationRequest, GenerationResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Implementations
/// map `GenerationRequest::turns` to their own wire vocabulary and classify
/// HTTP failures into `LlmError` variants; retry and fallback policy belong to
/// the caller, not the provider.
///
/// Implementations live in moodbites-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send one generation request and receive the full response.
    ///
    /// A successful response may carry empty text; the caller decides
    /// whether that is worth another attempt.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, LlmError>> + Send;
}

//! LLM provider abstractions and the resilient generation client.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `GenerationClient`: timeout, retry and fallback around one provider
//! - `RetryPolicy`: bounded exponential backoff
//! - `FallbackResponder`: canned answers for offline and failure paths

pub mod box_provider;
pub mod client;
pub mod fallback;
pub mod prompt;
pub mod provider;
pub mod retry;

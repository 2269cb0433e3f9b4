//! Shared domain types for MoodBites.
//!
//! This crate contains the types passed between the assistant core, the
//! infrastructure adapters and the CLI: chat messages, slash commands,
//! LLM request/response shapes, wellness log entries, configuration and
//! the error types shared across crate boundaries.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod command;
pub mod config;
pub mod error;
pub mod llm;
pub mod wellness;

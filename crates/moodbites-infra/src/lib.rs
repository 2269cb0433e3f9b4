//! Infrastructure layer for MoodBites.
//!
//! Contains implementations of the seams defined in `moodbites-core`:
//! SQLite storage for preferences, transcripts and wellness logs, the
//! Gemini LLM provider, config loading and credential lookup.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod sqlite;

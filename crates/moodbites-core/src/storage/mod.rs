//! Storage abstractions for MoodBites.
//!
//! Defines the durable key-value store trait used by the preference store
//! and transcript persistence. The SQLite implementation lives in
//! moodbites-infra.

pub mod kv_store;

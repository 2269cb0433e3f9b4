//! Assistant logic and storage trait definitions for MoodBites.
//!
//! This crate defines the "ports" (provider, key-value and wellness-data
//! traits) that the infrastructure layer implements, plus the assistant
//! itself: conversation session, command router, generation client,
//! preference store and fallback responder. It depends only on
//! `moodbites-types` -- never on `moodbites-infra` or any database/IO crate.

pub mod chat;
pub mod command;
pub mod llm;
pub mod preference;
pub mod storage;
pub mod wellness;

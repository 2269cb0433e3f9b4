//! Slash command parsing and dispatch.

pub mod parser;
pub mod router;

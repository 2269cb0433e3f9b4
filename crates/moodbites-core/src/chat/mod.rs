//! Conversation session and the per-turn context window.

pub mod session;
pub mod window;

//! Interactive CLI chat experience for MoodBites.
//!
//! This module implements the chat loop: async line input, a thinking
//! spinner while a turn is in flight, markdown rendering of replies, a
//! welcome banner and local controls. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

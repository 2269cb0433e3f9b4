//! Credential resolution.
//!
//! - `env`: reads the model API key from the environment

pub mod env;

pub use env::resolve_api_key;

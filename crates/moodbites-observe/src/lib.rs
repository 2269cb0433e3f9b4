//! Observability setup for MoodBites.
//!
//! Installs the global `tracing` subscriber used by the binary.

pub mod tracing_setup;

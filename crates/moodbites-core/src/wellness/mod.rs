//! Access to the mood and food log, local stats, and one-shot insight
//! requests over it.

pub mod insights;
pub mod provider;
pub mod stats;

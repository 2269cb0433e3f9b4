//! Remembered user facts.

pub mod store;

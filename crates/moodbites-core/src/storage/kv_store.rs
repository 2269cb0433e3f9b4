//! Key-value store trait.
//!
//! Defines the interface for durable, process-wide key-value storage.
//! `MemoryKvStore` is a non-durable implementation for tests and for running
//! without a data directory.

use std::collections::BTreeMap;

use moodbites_types::error::RepositoryError;
use tokio::sync::RwLock;

/// Key holding the remembered preference list.
pub const PREFERENCES_KEY: &str = "assistant.preferences";

/// Key holding the persisted conversation transcript.
pub const TRANSCRIPT_KEY: &str = "assistant.transcript";

/// Trait for key-value persistent storage.
///
/// Stores arbitrary JSON values keyed by string.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// In-memory `KvStore`. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Shared stores delegate to the inner store.
impl<T: KvStore> KvStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        (**self).set(key, value).await
    }
}

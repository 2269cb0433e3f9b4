//! Preference store.
//!
//! A deduplicated, insertion-ordered list of free-text facts the user asked
//! the assistant to remember. Backed by a `KvStore` under
//! [`PREFERENCES_KEY`]; process-wide rather than per conversation.

use moodbites_types::error::RepositoryError;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::storage::kv_store::{KvStore, PREFERENCES_KEY};

/// Durable list of remembered facts.
///
/// Reads take the read lock; `add` holds the write lock across persistence
/// so a concurrent `get` sees either the old list or the new one.
pub struct PreferenceStore<K: KvStore> {
    kv: K,
    items: RwLock<Vec<String>>,
}

impl<K: KvStore> PreferenceStore<K> {
    /// An empty store that persists to `kv`. Call [`load`](Self::load) to
    /// pick up previously saved facts.
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory list with the persisted one.
    ///
    /// A missing key is an empty list. Duplicates in the stored value are
    /// collapsed, keeping the first occurrence.
    pub async fn load(&self) -> Result<usize, RepositoryError> {
        let stored = match self.kv.get(PREFERENCES_KEY).await? {
            Some(value) => serde_json::from_value::<Vec<String>>(value)
                .map_err(|e| RepositoryError::Corrupt(e.to_string()))?,
            None => Vec::new(),
        };

        let mut deduped: Vec<String> = Vec::with_capacity(stored.len());
        for item in stored {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }

        let count = deduped.len();
        *self.items.write().await = deduped;
        debug!(count, "loaded preferences");
        Ok(count)
    }

    /// Snapshot of the current list in insertion order.
    pub async fn get(&self) -> Vec<String> {
        self.items.read().await.clone()
    }

    /// Append `fact` unless an identical string is already present.
    ///
    /// Returns `true` when the list changed. Matching is exact and
    /// case-sensitive. On a persistence failure the in-memory list is left
    /// unchanged and the error is returned.
    pub async fn add(&self, fact: &str) -> Result<bool, RepositoryError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing == fact) {
            return Ok(false);
        }

        let mut updated = items.clone();
        updated.push(fact.to_string());
        let value = serde_json::to_value(&updated)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        if let Err(e) = self.kv.set(PREFERENCES_KEY, &value).await {
            warn!(error = %e, "failed to persist preference");
            return Err(e);
        }

        *items = updated;
        debug!(count = items.len(), "preference added");
        Ok(true)
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

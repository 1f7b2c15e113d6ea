//! In-memory snapshot store for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};

/// Thread-safe in-memory snapshot store.
///
/// Clones share the same backing map, so a clone handed to a task store can
/// be inspected from the outside.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    entries: Arc<RwLock<HashMap<StorageKey, String>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: StorageKey, contents: impl Into<String>) -> Self {
        let entries = HashMap::from([(key, contents.into())]);
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn read(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &StorageKey, contents: &str) -> SnapshotStoreResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.insert(key.clone(), contents.to_owned());
        Ok(())
    }
}

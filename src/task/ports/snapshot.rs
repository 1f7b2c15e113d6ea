//! Key-value port for persisting the whole task collection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Durable key-value store holding serialized task collections.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been written under the key.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the backing store
    /// cannot be read.
    async fn read(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the backing store
    /// rejects the write.
    async fn write(&self, key: &StorageKey, contents: &str) -> SnapshotStoreResult<()>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// The storage key is not usable.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Fixed identifier the task collection is stored under.
///
/// Keys are ASCII alphanumerics plus `-`, `_`, and `.`, and never start with
/// `.`, so adapters can map them onto file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    /// Key used when no other is configured.
    pub const DEFAULT: &'static str = "taskmaster-tasks-v3";

    /// Creates a validated storage key.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::InvalidKey`] when the value is empty,
    /// starts with `.`, or contains other characters than ASCII
    /// alphanumerics, `-`, `_`, and `.`.
    pub fn new(value: impl Into<String>) -> SnapshotStoreResult<Self> {
        let raw = value.into();
        let has_valid_chars = raw
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if raw.is_empty() || raw.starts_with('.') || !has_valid_chars {
            return Err(SnapshotStoreError::InvalidKey(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl TryFrom<String> for StorageKey {
    type Error = SnapshotStoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

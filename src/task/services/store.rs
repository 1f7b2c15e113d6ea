//! Authoritative in-memory task collection with write-through persistence.

use crate::task::{
    domain::{Task, TaskId},
    ports::{SnapshotStore, SnapshotStoreError, StorageKey},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// What to do when the persisted snapshot cannot be read or decoded at
/// startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptSnapshotPolicy {
    /// Surface the failure to the caller.
    #[default]
    Fail,
    /// Log a warning and start with an empty collection.
    Reset,
}

/// Errors raised while restoring the collection from persistence.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// The snapshot store could not be read.
    #[error("failed to read task snapshot '{key}': {source}")]
    Read {
        /// Key that was read.
        key: StorageKey,
        /// Underlying store failure.
        #[source]
        source: SnapshotStoreError,
    },
    /// The stored snapshot is not a valid task collection.
    #[error("malformed task snapshot '{key}': {source}")]
    Decode {
        /// Key that was read.
        key: StorageKey,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Holds the ordered task collection and mirrors every commit to a
/// [`SnapshotStore`].
///
/// The store trusts its caller: no validation happens here.
pub struct TaskStore<S>
where
    S: SnapshotStore,
{
    snapshots: Arc<S>,
    key: StorageKey,
    tasks: Vec<Task>,
    persisted: bool,
}

impl<S> TaskStore<S>
where
    S: SnapshotStore,
{
    /// Creates an empty store bound to one snapshot key.
    #[must_use]
    pub const fn new(snapshots: Arc<S>, key: StorageKey) -> Self {
        Self {
            snapshots,
            key,
            tasks: Vec::new(),
            persisted: true,
        }
    }

    /// Creates a store and restores the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the snapshot cannot be read or
    /// decoded and `policy` is [`CorruptSnapshotPolicy::Fail`].
    pub async fn open(
        snapshots: Arc<S>,
        key: StorageKey,
        policy: CorruptSnapshotPolicy,
    ) -> TaskStoreResult<Self> {
        let mut store = Self::new(snapshots, key);
        store.restore(policy).await?;
        Ok(store)
    }

    /// Replaces the collection wholesale without writing it back.
    pub fn load(&mut self, snapshot: Vec<Task>) {
        self.tasks = snapshot;
    }

    /// Reads the persisted collection once and loads it.
    ///
    /// An absent key yields an empty collection. Returns the number of
    /// loaded tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the snapshot cannot be read or
    /// decoded and `policy` is [`CorruptSnapshotPolicy::Fail`].
    pub async fn restore(&mut self, policy: CorruptSnapshotPolicy) -> TaskStoreResult<usize> {
        let snapshot = match self.read_snapshot().await {
            Ok(tasks) => tasks,
            Err(err) if policy == CorruptSnapshotPolicy::Reset => {
                tracing::warn!(error = %err, "discarding unreadable task snapshot");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        let count = snapshot.len();
        self.load(snapshot);
        tracing::debug!(key = %self.key, count, "task collection restored");
        Ok(count)
    }

    async fn read_snapshot(&self) -> TaskStoreResult<Vec<Task>> {
        let contents = self
            .snapshots
            .read(&self.key)
            .await
            .map_err(|source| TaskStoreError::Read {
                key: self.key.clone(),
                source,
            })?;
        let Some(json) = contents else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|source| TaskStoreError::Decode {
            key: self.key.clone(),
            source,
        })
    }

    /// Replaces the collection and writes it through to the snapshot store.
    ///
    /// Persistence failures are logged and recorded in
    /// [`Self::is_persisted`]; the in-memory collection stays authoritative.
    pub async fn commit(&mut self, collection: Vec<Task>) {
        self.tasks = collection;
        self.persisted = match self.write_snapshot().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to persist task collection");
                false
            }
        };
    }

    async fn write_snapshot(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let json = serde_json::to_string(&self.tasks)?;
        self.snapshots.write(&self.key, &json).await?;
        Ok(())
    }

    /// Returns the present collection in storage order.
    #[must_use]
    pub fn current(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns whether the last commit reached the snapshot store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Returns the key the collection is stored under.
    #[must_use]
    pub const fn key(&self) -> &StorageKey {
        &self.key
    }
}

//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod snapshot;

pub use snapshot::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};

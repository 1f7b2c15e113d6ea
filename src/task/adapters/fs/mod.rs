//! Filesystem adapters.

mod snapshot;

pub use snapshot::FsSnapshotStore;

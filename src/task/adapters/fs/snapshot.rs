//! Filesystem snapshot store: one JSON file per key in a data directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

use crate::task::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};

const SNAPSHOT_EXTENSION: &str = "json";
const PENDING_SUFFIX: &str = "pending";

/// Snapshot store rooted in a capability-scoped directory.
///
/// Each key maps to `<key>.json`. Writes land in a sibling `.pending` file
/// first and are renamed over the target, so readers never observe a
/// half-written snapshot.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: Arc<Dir>,
    path: Utf8PathBuf,
}

impl FsSnapshotStore {
    /// Opens the data directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(dir: impl AsRef<Utf8Path>) -> SnapshotStoreResult<Self> {
        let path = dir.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        let root = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        Ok(Self {
            root: Arc::new(root),
            path: path.to_owned(),
        })
    }

    /// Returns the data directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the file name used for `key`.
    #[must_use]
    pub fn file_name(key: &StorageKey) -> String {
        format!("{key}.{SNAPSHOT_EXTENSION}")
    }

    async fn run_blocking<T, F>(&self, operation: F) -> SnapshotStoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || operation(&*root))
            .await
            .map_err(SnapshotStoreError::persistence)?
            .map_err(SnapshotStoreError::persistence)
    }
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn read(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>> {
        let file_name = Self::file_name(key);
        self.run_blocking(move |root| match root.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn write(&self, key: &StorageKey, contents: &str) -> SnapshotStoreResult<()> {
        let file_name = Self::file_name(key);
        let pending_name = format!("{file_name}.{PENDING_SUFFIX}");
        let payload = contents.to_owned();
        self.run_blocking(move |root| {
            root.write(&pending_name, payload.as_bytes())?;
            root.rename(&pending_name, root, &file_name)
        })
        .await?;
        tracing::debug!(key = %key, "snapshot written");
        Ok(())
    }
}

//! Tracker configuration loaded from an optional TOML file.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/taskmaster"
//! storage_key = "taskmaster-tasks-v3"
//! submit_latency_ms = 300
//! on_corrupt_snapshot = "reset"
//! ```

use crate::task::{
    ports::StorageKey,
    services::{CorruptSnapshotPolicy, MAX_SUBMIT_LATENCY},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Directory name appended to the platform data directory.
pub const APP_DIR_NAME: &str = "taskmaster";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// The configured submit latency exceeds the allowed bound.
    #[error("submit_latency_ms must be at most {max_ms}, got {value}")]
    LatencyTooLarge {
        /// Configured value.
        value: u64,
        /// Allowed maximum.
        max_ms: u128,
    },
    /// No data directory was configured and none could be derived.
    #[error("no data directory configured and no platform data directory available")]
    MissingDataDir,
}

/// Tracker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Directory holding the snapshot file.
    pub data_dir: Option<Utf8PathBuf>,
    /// Key the task collection is stored under.
    pub storage_key: StorageKey,
    /// Simulated latency for create and edit submissions.
    pub submit_latency_ms: u64,
    /// Startup behaviour for unreadable snapshots.
    pub on_corrupt_snapshot: CorruptSnapshotPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: StorageKey::default(),
            submit_latency_ms: 0,
            on_corrupt_snapshot: CorruptSnapshotPolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let Some(contents) = read_optional(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?
        else {
            return Ok(Self::default());
        };
        let config = Self::parse(&contents, path)?;
        tracing::debug!(%path, "configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys, or an
    /// invalid storage key, and [`ConfigError::LatencyTooLarge`] when the
    /// latency exceeds [`MAX_SUBMIT_LATENCY`].
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Utf8Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Utf8Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let max_ms = MAX_SUBMIT_LATENCY.as_millis();
        if u128::from(self.submit_latency_ms) > max_ms {
            return Err(ConfigError::LatencyTooLarge {
                value: self.submit_latency_ms,
                max_ms,
            });
        }
        Ok(())
    }

    /// Returns the submit latency as a [`Duration`].
    #[must_use]
    pub const fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    /// Resolves the data directory: an explicit override wins, then the
    /// configured directory, then the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDataDir`] when nothing is configured and
    /// the platform directory is unknown or not UTF-8.
    pub fn resolve_data_dir(
        &self,
        override_dir: Option<&Utf8Path>,
    ) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(dir) = override_dir.or(self.data_dir.as_deref()) {
            return Ok(dir.to_owned());
        }
        dirs::data_dir()
            .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::MissingDataDir)
    }
}

fn read_optional(path: &Utf8Path) -> io::Result<Option<String>> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("config path must include a file name"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(file_name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

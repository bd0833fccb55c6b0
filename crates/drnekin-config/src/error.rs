//! # Config Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Settings file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file or its directory could not be created, read or
    /// written.
    ///
    /// ## When This Occurs
    /// - Permission denied on the parent directory
    /// - Disk full
    /// - Path points at a directory
    #[error("Config storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but is not a valid settings object.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Settings could not be encoded (should not happen for `AppConfig`).
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

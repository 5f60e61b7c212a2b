//! Error types for the cue synchronization engine.
//!
//! None of these are fatal: the session recovers from each one locally and
//! leaves its state visually empty or unchanged.

use std::path::PathBuf;

/// Errors produced by cue loading, container waits and media handling.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Cue data could not be fetched or did not have the `mouthCues` shape.
    #[error("Cue data unavailable from {source_url}: {reason}")]
    SourceUnavailable { source_url: String, reason: String },

    /// The readiness wait ran out before the container appeared.
    #[error("Container not found: {path}")]
    ContainerNotFound { path: String },

    /// The native media element reported a playback fault.
    #[error("Media error: {0}")]
    MediaError(String),

    /// The owner of the session cancelled a pending wait.
    #[error("Wait cancelled")]
    Cancelled,
}

impl SyncError {
    pub fn source_unavailable(source_url: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_url: source_url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from loading or saving the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

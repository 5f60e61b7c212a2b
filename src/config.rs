//! Configuration management for lipcue
//!
//! Loaded from `<config_dir>/lipcue/config.toml`. A missing file yields the
//! defaults and missing fields fall back per field.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::RendererOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub readiness: ReadinessConfig,
    #[serde(default)]
    pub dom: DomConfig,
    #[serde(default)]
    pub renderer: RendererOptions,
}

/// Time windows used by the synchronization engine (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Renderer/native divergence tolerated before a resync
    pub drift_tolerance: f64,
    /// Window around the playhead in which cues are shown active
    pub highlight_threshold: f64,
    /// Maximum distance for a click-to-cue match
    pub nearest_threshold: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drift_tolerance: 0.1,
            highlight_threshold: 5.0,
            nearest_threshold: 1.0,
        }
    }
}

/// Bounded wait for the cue-point container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Nested element ids, outermost first
    pub container_path: Vec<String>,
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            container_path: vec!["CardMouth".to_string(), "CuePointsArea".to_string()],
            timeout_ms: 10_000,
            poll_interval_ms: 500,
        }
    }
}

impl ReadinessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval, never zero.
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval_ms == 0 {
            tracing::warn!(
                "poll_interval_ms = 0 would busy-spin, using {}ms",
                Self::default().poll_interval_ms
            );
            Duration::from_millis(Self::default().poll_interval_ms)
        } else {
            Duration::from_millis(self.poll_interval_ms)
        }
    }
}

/// Names used to find and mark cue elements in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Id of the element holding the cue cards
    pub cue_container: String,
    /// Class tagging an element as a cue point
    pub marker_class: String,
    /// Class toggled on active cues
    pub active_class: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            cue_container: "CuePoints".to_string(),
            marker_class: "cue-point".to_string(),
            active_class: "blink".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("lipcue").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = self.to_toml()?;
        fs::write(path, content).map_err(write_err)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

//! Editor configuration with documented defaults
//!
//! Settings are read from an optional TOML file. Missing keys fall back to
//! the values in `Default`, which mirror the constants in `core::constants`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::constants::{DIM_MAX, DIST_MIN};

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the town editor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum gap kept between districts and links during interactive edits
    ///
    /// Batch construction from a file ignores this margin and only rejects
    /// real superpositions. The audit reports anything closer than this.
    pub safety_distance: f64,

    /// Half-size of the editing plane (world units)
    ///
    /// A district whose circle leaves `[-extent, extent]` on either axis is
    /// reported by the audit. It is never rejected outright.
    pub town_extent: f64,

    /// Default tracing directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            safety_distance: DIST_MIN,
            town_extent: DIM_MAX,
            log_filter: "archipelago=info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.safety_distance.is_finite() || self.safety_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "safety_distance ({}) must be a finite, non-negative number",
                self.safety_distance
            )));
        }

        if !self.town_extent.is_finite() || self.town_extent <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "town_extent ({}) must be positive",
                self.town_extent
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EditorConfig> = OnceLock::new();

/// Get the global editor config (initializes with defaults if not set)
pub fn config() -> &'static EditorConfig {
    CONFIG.get_or_init(EditorConfig::default)
}

/// Set the global editor config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EditorConfig) -> Result<(), EditorConfig> {
    CONFIG.set(config)
}

//! Defaults loaded from `~/.config/ellipsomap/config.toml`.
//!
//! ```toml
//! [grid]
//! points = 100
//! polar = false
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::output::GridFormat;

/// Mesh points per axis when neither config nor CLI sets one.
pub const DEFAULT_POINTS: usize = 100;

/// Grid defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Mesh points per axis.
    pub points: usize,
    /// Report mesh coordinates as (r, θ).
    pub polar: bool,
    pub format: GridFormat,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            polar: false,
            format: GridFormat::Json,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
}

impl Config {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist (configuration is optional).
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ellipsomap")
        .join("config.toml")
}

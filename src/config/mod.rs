//! Configuration loading and management

mod backend;
mod io;
mod map;

pub use backend::BackendSettings;
pub use map::MapSettings;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::command::Grammar;

/// Environment variable that overrides `backend.token`
pub const TOKEN_ENV: &str = "ROBONAV_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard API connection
    #[serde(default)]
    pub backend: BackendSettings,

    /// Geometry of the rendered map image
    #[serde(default)]
    pub map: MapSettings,

    /// Vocabulary of the voice command rules
    #[serde(default)]
    pub grammar: Grammar,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration for a working directory
    ///
    /// Looks for `.robonav/config.toml` in `dir`, then the global config,
    /// and falls back to defaults. Environment overrides are applied last.
    pub fn load(dir: &Path) -> Result<Self> {
        let local_path = Self::local_config_path(dir);
        let global_path = Self::global_config_path();

        let mut config = if local_path.exists() {
            Self::from_file(&local_path)?
        } else if global_path.exists() {
            Self::from_file(&global_path)?
        } else {
            tracing::debug!("No config file found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.backend.token = Some(token);
        }
    }
}

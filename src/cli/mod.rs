//! CLI command implementations

pub mod init;
pub mod interpret;
pub mod listen;
pub mod map;

use anyhow::{Context, Result};
use std::path::Path;

use robonav::config::Config;

/// Load the config named on the command line, or look it up from `work_dir`
pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Config::load(work_dir).context("Failed to load configuration"),
    }
}

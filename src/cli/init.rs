//! Init command implementation

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use robonav::config::Config;

/// Write a default `.robonav/config.toml`
pub async fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| Config::local_config_path(work_dir));

    if !Config::init_at(&config_path, force)? {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    println!("Created: {}", config_path.display());
    Ok(())
}

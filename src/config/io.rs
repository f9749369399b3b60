//! Configuration file I/O operations

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.robonav/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".robonav")
    }

    /// Get the global config file path (~/.robonav/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Get the project-local config file path (<dir>/.robonav/config.toml)
    pub fn local_config_path(dir: &Path) -> PathBuf {
        dir.join(".robonav").join("config.toml")
    }

    /// Write the config as TOML, replacing `path` atomically
    ///
    /// Concurrent writers are serialized on a sibling `.lock` file; readers
    /// only ever see the old or the new content.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_replacing(path, format!("{}{}", CONFIG_HEADER, body).as_bytes())
    }

    /// Write a default config to `path`
    ///
    /// Returns `false` without touching the file when it already exists and
    /// `force` is not set.
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            tracing::info!("Config already exists at {}", path.display());
            return Ok(false);
        }

        Self::default().save_to_file(path)?;
        tracing::info!("Wrote default config to {}", path.display());
        Ok(true)
    }
}

const CONFIG_HEADER: &str = "\
# robonav configuration
# The backend token can also be supplied through ROBONAV_TOKEN.

";

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

    let lock_path = path.with_extension("toml.lock");
    let lock = File::create(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
    lock.lock_exclusive()
        .context("Failed to acquire config lock")?;

    let staged = path.with_extension("toml.tmp");
    let mut file = File::create(&staged)
        .with_context(|| format!("Failed to create temp file: {}", staged.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write {}", staged.display()))?;
    drop(file);

    fs::rename(&staged, path)
        .with_context(|| format!("Failed to replace config file: {}", path.display()))?;
    Ok(())
}

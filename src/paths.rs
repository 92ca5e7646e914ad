//! Path utilities for fieldlog data.
//!
//! - [`data_dir`] - `~/.fieldlog/` (or `FIELDLOG_HOME`)
//! - [`default_store_path`] - `~/.fieldlog/records.redb`
//! - [`default_config_path`] - `~/.fieldlog/fieldlog.toml`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "FIELDLOG_HOME";

/// Get the fieldlog data directory.
///
/// Resolution order:
/// 1. `FIELDLOG_HOME` environment variable (if set and non-empty)
/// 2. `~/.fieldlog/` (default)
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".fieldlog"))
}

/// Get the record database path: `<data dir>/records.redb`
pub fn default_store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("records.redb"))
}

/// Get the configuration file path: `<data dir>/fieldlog.toml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("fieldlog.toml"))
}

//! CLI command implementations.
//!
//! - [`add`] - save a capture
//! - [`list`] - show stored records
//! - [`remove`] - delete one record or clear all
//! - [`export`] - write a CSV or ZIP artifact

pub mod add;
pub mod export;
pub mod list;
pub mod remove;

use anyhow::{Context as _, Result};
use fieldlog::config::Config;
use fieldlog::paths;
use fieldlog::store::RecordStore;
use std::path::Path;
use tracing::debug;

/// Loaded configuration and opened store shared by every command.
pub struct Context {
    pub config: Config,
    pub store: RecordStore,
}

impl Context {
    /// Load configuration and open the record store.
    ///
    /// An explicit `--config` must exist; the default config file is optional.
    /// `--db` wins over `store.path`, which wins over the data directory default.
    pub fn load(config_path: Option<&Path>, db_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load_or_default(paths::default_config_path()?)?,
        };

        let store_path = match db_path.or(config.store.path.as_deref()) {
            Some(path) => path.to_path_buf(),
            None => paths::default_store_path()?,
        };
        debug!(store = %store_path.display(), "Opening record store");

        let store = RecordStore::file(&store_path)
            .with_context(|| format!("Failed to open record store: {}", store_path.display()))?;

        Ok(Self { config, store })
    }
}

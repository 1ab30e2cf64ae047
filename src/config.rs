// src/config.rs

//! Configuration loading utilities.
//!
//! Convenience functions for loading the configuration and the fixture it
//! points at from a data directory.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::Catalog;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// Falls back to defaults if loading fails.
pub fn load_config(data_dir: &Path) -> Config {
    Config::load_or_default(data_dir.join(CONFIG_FILE))
}

/// Load and validate both the config and the fixture it names.
pub fn load_all(data_dir: &Path) -> Result<(Config, Catalog)> {
    load_all_with(load_config(data_dir), data_dir)
}

/// Validate an already loaded config and load the fixture it names.
pub fn load_all_with(config: Config, data_dir: &Path) -> Result<(Config, Catalog)> {
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;

    let fixture_path = config.fixture_path(data_dir);
    let catalog = Catalog::load(&fixture_path)?;

    Ok((config, catalog))
}

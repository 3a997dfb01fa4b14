//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use mylocation_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "mylocation.toml";

/// Load layered configuration: defaults, file, environment, then CLI overrides
///
/// An explicit `path` must exist; the default file is only read when present.
pub fn load_config(path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                config = config
                    .load_from_file(&default_path)
                    .context("Failed to load mylocation.toml")?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

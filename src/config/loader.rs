// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::Config;
use crate::config::validate::validate_config;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Result of [`load_or_init`].
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// True when the file did not exist and defaults were written to it.
    pub created_default: bool,
}

/// Parse and validate a configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load a configuration file from a given path.
///
/// Fails if the file is missing; see [`load_or_init`] for the self-healing
/// variant used by the binary.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Config> {
    let contents = fs.read_to_string(path.as_ref())?;
    parse_config(&contents)
}

/// Load the configuration, materializing the defaults first if the file
/// does not exist yet.
///
/// Used both at startup and by the reload loop. Read errors other than a
/// missing file, TOML errors and validation errors are all returned.
pub fn load_or_init(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<LoadedConfig> {
    let path = path.as_ref();

    if !fs.exists(path) {
        let config = Config::default();
        let contents = toml::to_string_pretty(&config)?;
        fs.write(path, contents.as_bytes())?;
        return Ok(LoadedConfig {
            config,
            created_default: true,
        });
    }

    let config = load_from_path(fs, path)?;
    Ok(LoadedConfig {
        config,
        created_default: false,
    })
}

/// Default config location: `dirhook.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("dirhook.toml")
}

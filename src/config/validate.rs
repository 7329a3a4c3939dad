// src/config/validate.rs

use crate::config::model::Config;
use crate::errors::{DirhookError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `target_path` is not empty
/// - `check_interval >= 1` (the health monitor cannot tick every 0 seconds)
///
/// It does **not** check `post_process`; an unknown action is reported by
/// the worker that tries to apply it.
pub fn validate_config(cfg: &Config) -> Result<()> {
    validate_paths(cfg)?;
    validate_intervals(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &Config) -> Result<()> {
    if cfg.target_path.as_os_str().is_empty() {
        return Err(DirhookError::ConfigError(
            "target_path must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_intervals(cfg: &Config) -> Result<()> {
    if cfg.check_interval == 0 {
        return Err(DirhookError::ConfigError(
            "check_interval must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

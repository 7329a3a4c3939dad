// src/config/mod.rs

//! Configuration loading, validation and live publication for dirhook.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, writing defaults when it is missing (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).
//! - Compare snapshots for reload logging (`diff.rs`).
//! - Publish the current snapshot to every reader (`live.rs`).

pub mod diff;
pub mod live;
pub mod loader;
pub mod model;
pub mod validate;

pub use diff::{diff_configs, FieldChange};
pub use live::LiveConfig;
pub use loader::{default_config_path, load_from_path, load_or_init, parse_config, LoadedConfig};
pub use model::Config;
pub use validate::validate_config;

// tests/cli_logging.rs

use std::path::PathBuf;

use clap::Parser;

use dirhook::cli::{CliArgs, LogLevel};
use dirhook::logging::resolve_level;

#[test]
fn cli_defaults() {
    let args = CliArgs::parse_from(["dirhook"]);
    assert!(args.config.is_none());
    assert_eq!(args.config_path(), PathBuf::from("dirhook.toml"));
    assert!(!args.once);
    assert!(!args.dry_run);
    assert!(args.log_level.is_none());
}

#[test]
fn cli_flags_are_parsed() {
    let args = CliArgs::parse_from([
        "dirhook",
        "--config",
        "conf/custom.toml",
        "--once",
        "--log-level",
        "debug",
    ]);
    assert_eq!(args.config_path(), PathBuf::from("conf/custom.toml"));
    assert!(args.once);
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
}

#[test]
fn cli_level_beats_environment() {
    assert_eq!(resolve_level(Some(LogLevel::Warn), Some("trace")), tracing::Level::WARN);
}

#[test]
fn environment_level_is_used_when_flag_absent() {
    assert_eq!(resolve_level(None, Some(" DEBUG ")), tracing::Level::DEBUG);
    assert_eq!(resolve_level(None, Some("warning")), tracing::Level::WARN);
}

#[test]
fn unknown_or_missing_level_defaults_to_info() {
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}

// tests/config_reload.rs

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use dirhook::config::{
    diff_configs, load_from_path, load_or_init, parse_config, Config, FieldChange, LiveConfig,
};
use dirhook::engine::{apply_reload, run_reload_loop};
use dirhook::errors::DirhookError;
use dirhook::fs::mock::MockFileSystem;
use dirhook::fs::RealFileSystem;

use crate::common::{init_tracing, test_context, with_timeout, ConfigBuilder};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn missing_keys_fall_back_to_defaults() -> TestResult {
    let cfg = parse_config(
        r#"
target_path = "incoming"
oncreate_run = ["cat", "{filepath}"]
"#,
    )?;

    assert_eq!(cfg.target_path, PathBuf::from("incoming"));
    assert_eq!(cfg.processed_path, PathBuf::from("completed"));
    assert_eq!(cfg.max_workers, 1);
    assert_eq!(cfg.post_process, 0);
    assert!(cfg.process_on_start);
    assert_eq!(cfg.debounce, 100);
    assert_eq!(cfg.reload_config, 0);
    assert_eq!(cfg.check_interval, 5);
    assert_eq!(cfg.oncreate_run, vec!["cat", "{filepath}"]);
    assert!(cfg.onremove_run.is_empty());
    Ok(())
}

#[test]
fn zero_check_interval_is_rejected() {
    match parse_config("check_interval = 0") {
        Err(DirhookError::ConfigError(msg)) => assert!(msg.contains("check_interval")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_post_process_loads_but_fails_on_use() -> TestResult {
    let cfg = parse_config("post_process = 7")?;
    match cfg.post_process_action() {
        Err(DirhookError::InvalidPostProcess(7)) => Ok(()),
        other => panic!("expected InvalidPostProcess, got {other:?}"),
    }
}

#[test]
fn missing_config_file_is_created_with_defaults() -> TestResult {
    let fs = MockFileSystem::new();
    let loaded = load_or_init(&fs, "/etc/dirhook/dirhook.toml")?;

    assert!(loaded.created_default);
    assert_eq!(loaded.config, Config::default());

    // The written file round-trips to the same defaults.
    let reread = load_from_path(&fs, "/etc/dirhook/dirhook.toml")?;
    assert_eq!(reread, Config::default());

    let again = load_or_init(&fs, "/etc/dirhook/dirhook.toml")?;
    assert!(!again.created_default);
    Ok(())
}

#[test]
fn malformed_config_is_a_toml_error() {
    let fs = MockFileSystem::new();
    fs.add_file("/cfg.toml", "max_workers = [");
    assert!(matches!(
        load_or_init(&fs, "/cfg.toml"),
        Err(DirhookError::TomlError(_))
    ));
}

#[test]
fn diff_reports_only_changed_fields() {
    let old = ConfigBuilder::new().workers(1).build();
    let new = ConfigBuilder::new().workers(4).build();

    assert_eq!(
        diff_configs(&old, &new),
        vec![FieldChange {
            field: "max_workers",
            old: "1".to_string(),
            new: "4".to_string(),
        }]
    );
    assert!(diff_configs(&old, &old).is_empty());
}

#[test]
fn apply_reload_publishes_a_whole_snapshot() {
    let live = LiveConfig::new(ConfigBuilder::new().workers(1).build());
    let before = live.snapshot();

    let changes = apply_reload(
        &live,
        ConfigBuilder::new().workers(3).exclude("tmp").build(),
    );

    let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
    assert_eq!(fields, vec!["max_workers", "exclude_path"]);

    let after = live.snapshot();
    assert_eq!(after.max_workers, 3);
    assert_eq!(after.exclude_path, vec!["tmp".to_string()]);
    // Old readers keep their consistent snapshot.
    assert_eq!(before.max_workers, 1);
    assert!(before.exclude_path.is_empty());
}

fn write_config(dir: &TempDir, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.path().join("dirhook.toml");
    fs::write(&path, body)?;
    Ok(path)
}

/// Swap the file contents in one rename so the loop never reads a partial write.
fn replace_config(path: &Path, body: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)
}

#[tokio::test]
async fn reload_loop_picks_up_changed_field() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_config(&dir, "reload_config = 50\nmax_workers = 1\n")?;
    let initial = load_from_path(&RealFileSystem, &path)?;

    let tc = test_context(initial, dir.path(), Arc::new(RealFileSystem));
    let mut updates = tc.ctx.config.subscribe();

    let handle = tokio::spawn(run_reload_loop(Arc::clone(&tc.ctx), path.clone()));

    replace_config(&path, "reload_config = 50\nmax_workers = 4\n")?;

    with_timeout(async {
        loop {
            updates.changed().await.expect("live config dropped");
            if updates.borrow().max_workers == 4 {
                break;
            }
        }
    })
    .await;

    assert_eq!(tc.ctx.config.snapshot().max_workers, 4);
    handle.abort();
    Ok(())
}

#[tokio::test]
async fn reload_loop_stops_when_disabled() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_config(&dir, "reload_config = 50\n")?;
    let initial = load_from_path(&RealFileSystem, &path)?;
    let tc = test_context(initial, dir.path(), Arc::new(RealFileSystem));

    let handle = tokio::spawn(run_reload_loop(Arc::clone(&tc.ctx), path.clone()));
    replace_config(&path, "reload_config = 0\n")?;

    with_timeout(handle).await?;
    assert_eq!(tc.ctx.config.snapshot().reload_config, 0);
    Ok(())
}

#[tokio::test]
async fn reload_loop_does_not_start_when_disabled() -> TestResult {
    let tc = test_context(ConfigBuilder::new().build(), "/watch", Arc::new(MockFileSystem::new()));
    with_timeout(run_reload_loop(Arc::clone(&tc.ctx), PathBuf::from("/cfg.toml"))).await;
    Ok(())
}

#[tokio::test]
async fn malformed_reload_is_fatal() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_config(&dir, "reload_config = 50\n")?;
    let initial = load_from_path(&RealFileSystem, &path)?;
    let mut tc = test_context(initial, dir.path(), Arc::new(RealFileSystem));

    let handle = tokio::spawn(run_reload_loop(Arc::clone(&tc.ctx), path.clone()));
    replace_config(&path, "reload_config = [")?;

    let fatal = with_timeout(tc.fatal_rx.recv()).await;
    assert!(matches!(fatal, Some(DirhookError::TomlError(_))), "got {fatal:?}");

    with_timeout(handle).await?;
    Ok(())
}

#[tokio::test]
async fn missing_file_at_reload_is_recreated() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_config(&dir, "reload_config = 50\n")?;
    let initial = load_from_path(&RealFileSystem, &path)?;
    let tc = test_context(initial, dir.path(), Arc::new(RealFileSystem));

    let handle = tokio::spawn(run_reload_loop(Arc::clone(&tc.ctx), path.clone()));
    fs::remove_file(&path)?;

    // Defaults disable reloading, so the loop ends after recreating the file.
    with_timeout(handle).await?;
    assert!(path.exists());
    assert_eq!(*tc.ctx.config.snapshot(), Config::default());
    Ok(())
}

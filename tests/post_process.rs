// tests/post_process.rs

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use dirhook::config::Config;
use dirhook::engine::apply_post_process;
use dirhook::errors::DirhookError;
use dirhook::fs::mock::MockFileSystem;
use dirhook::fs::RealFileSystem;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn config(post_process: i64, processed: &Path) -> Config {
    Config {
        post_process,
        processed_path: processed.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn move_relocates_file_under_processed_path() -> TestResult {
    let dir = TempDir::new()?;
    let target = dir.path().join("incoming");
    let processed = dir.path().join("completed").join("nested");
    fs::create_dir_all(&target)?;
    let file = target.join("report.txt");
    fs::write(&file, "payload")?;

    apply_post_process(&RealFileSystem, &config(1, &processed), &file)?;

    assert!(!file.exists());
    assert_eq!(fs::read_to_string(processed.join("report.txt"))?, "payload");
    Ok(())
}

#[test]
fn delete_removes_file() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("a.txt");
    fs::write(&file, "x")?;

    apply_post_process(&RealFileSystem, &config(-1, dir.path()), &file)?;

    assert!(!file.exists());
    Ok(())
}

#[test]
fn do_nothing_leaves_file_untouched() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("a.txt");
    fs::write(&file, "x")?;

    apply_post_process(&RealFileSystem, &config(0, &dir.path().join("completed")), &file)?;

    assert_eq!(fs::read_to_string(&file)?, "x");
    assert!(!dir.path().join("completed").exists());
    Ok(())
}

#[test]
fn out_of_range_action_is_fatal() {
    let fs = MockFileSystem::new();
    fs.add_file("/watch/a.txt", "x");

    let err = apply_post_process(&fs, &config(2, Path::new("/done")), Path::new("/watch/a.txt"))
        .expect_err("post_process = 2 must fail");

    assert!(matches!(err, DirhookError::InvalidPostProcess(2)));
    assert!(err.is_fatal());
    assert!(fs.file_contents("/watch/a.txt").is_some());
}

#[test]
fn moving_a_vanished_file_is_a_recoverable_error() {
    let fs = MockFileSystem::new();

    let err = apply_post_process(&fs, &config(1, Path::new("/done")), Path::new("/watch/gone.txt"))
        .expect_err("source does not exist");

    assert!(!err.is_fatal());
}

// tests/executor.rs

mod common;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use dirhook::exec::command::{prepare_command_with, resolve_executable_with};
use dirhook::exec::{
    prepare_command, read_bounded_line, run_exit_command, run_init_command, CommandRunner,
    ProcessRunner, MAX_LINE_BYTES,
};

use crate::common::{init_tracing, with_timeout, ConfigBuilder, RecordingRunner};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_command_prepares_nothing() {
    assert!(prepare_command(&[], Some(Path::new("/watch/a.txt"))).is_none());
}

#[test]
fn placeholder_is_replaced_by_the_file_path() {
    let prepared = prepare_command_with(
        &tokens(&["/bin/convert", "--in", "{filepath}", "--verbose"]),
        Some(Path::new("/watch/sub/a.txt")),
        None,
    )
    .expect("non-empty command");

    assert_eq!(prepared.program, PathBuf::from("/bin/convert"));
    assert_eq!(
        prepared.args,
        vec![
            OsString::from("--in"),
            OsString::from("/watch/sub/a.txt"),
            OsString::from("--verbose"),
        ]
    );
    assert_eq!(prepared.working_dir, Some(PathBuf::from("/watch/sub")));
}

#[test]
fn placeholder_without_file_becomes_empty_argument() {
    let prepared = prepare_command_with(&tokens(&["/bin/echo", "{filepath}"]), None, None)
        .expect("non-empty command");

    assert_eq!(prepared.args, vec![OsString::new()]);
    assert_eq!(prepared.working_dir, None);
}

#[test]
fn only_whole_placeholder_tokens_are_substituted() {
    let prepared = prepare_command_with(
        &tokens(&["/bin/echo", "file={filepath}"]),
        Some(Path::new("/watch/a.txt")),
        None,
    )
    .expect("non-empty command");

    assert_eq!(prepared.args, vec![OsString::from("file={filepath}")]);
}

#[test]
fn executable_next_to_program_wins_over_search_path() -> TestResult {
    let dir = TempDir::new()?;
    let local = dir.path().join("my-tool");
    fs::write(&local, "#!/bin/sh\n")?;

    assert_eq!(resolve_executable_with("my-tool", Some(dir.path())), local);
    Ok(())
}

#[test]
fn absolute_and_unknown_names_pass_through() {
    assert_eq!(
        resolve_executable_with("/opt/tool", None),
        PathBuf::from("/opt/tool")
    );
    assert_eq!(
        resolve_executable_with("dirhook-no-such-binary-xyz", None),
        PathBuf::from("dirhook-no-such-binary-xyz")
    );
}

#[tokio::test]
async fn lifecycle_commands_run_without_a_file_path() -> TestResult {
    let cfg = ConfigBuilder::new()
        .init_run(&["setup", "{filepath}"])
        .exit_run(&["teardown"])
        .build();
    let runner = RecordingRunner::new();

    run_init_command(&runner, &cfg).await?;
    run_exit_command(&runner, &cfg).await;

    let runs = runner.runs();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].command, tokens(&["setup", "{filepath}"]));
    assert_eq!(runs[0].file_path, None);
    assert_eq!(runs[1].command, tokens(&["teardown"]));
    Ok(())
}

#[tokio::test]
async fn failing_init_command_is_an_error_but_exit_command_is_not() -> TestResult {
    let cfg = ConfigBuilder::new()
        .init_run(&["setup"])
        .exit_run(&["teardown"])
        .build();
    let runner = RecordingRunner::new().failing();

    assert!(run_init_command(&runner, &cfg).await.is_err());
    run_exit_command(&runner, &cfg).await;
    assert_eq!(runner.run_count(), 2);
    Ok(())
}

#[tokio::test]
async fn process_runner_treats_empty_command_as_success() -> TestResult {
    ProcessRunner::new().run(&[], None).await?;
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn process_runner_reports_exit_status() -> TestResult {
    init_tracing();
    let runner = ProcessRunner::new();

    with_timeout(runner.run(&tokens(&["sh", "-c", "echo out; echo err >&2"]), None)).await?;

    let failed = with_timeout(runner.run(&tokens(&["sh", "-c", "exit 3"]), None)).await;
    assert!(failed.is_err());

    let missing = with_timeout(runner.run(&tokens(&["dirhook-no-such-binary-xyz"]), None)).await;
    assert!(missing.is_err());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn process_runner_runs_in_the_file_directory() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let file = dir.path().join("input.txt");
    fs::write(&file, "hello")?;

    let runner = ProcessRunner::new();
    let cmd = tokens(&["sh", "-c", "pwd > cwd.out; cat \"$0\" > copy.out", "{filepath}"]);
    with_timeout(runner.run(&cmd, Some(&file))).await?;

    let cwd = fs::read_to_string(dir.path().join("cwd.out"))?;
    assert_eq!(
        fs::canonicalize(cwd.trim())?,
        fs::canonicalize(dir.path())?
    );
    assert_eq!(fs::read_to_string(dir.path().join("copy.out"))?, "hello");
    Ok(())
}

#[tokio::test]
async fn overlong_output_lines_are_split_at_the_limit() -> TestResult {
    let mut reader: &[u8] = b"abcdefghijklmno\nxy";
    let mut buf = Vec::new();
    let mut lines = Vec::new();

    loop {
        buf.clear();
        if read_bounded_line(&mut reader, &mut buf, 10).await? == 0 {
            break;
        }
        lines.push(String::from_utf8(buf.clone())?);
    }

    assert_eq!(lines, vec!["abcdefghij", "klmno\n", "xy"]);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn process_runner_survives_output_without_newlines() -> TestResult {
    init_tracing();
    let runner = ProcessRunner::new();
    let script = format!("head -c {} /dev/zero | tr '\\0' 'a'", MAX_LINE_BYTES * 3);

    with_timeout(runner.run(&tokens(&["sh", "-c", &script]), None)).await?;
    Ok(())
}

// src/exec/runner.rs

//! Spawning a prepared command and forwarding its output to the log.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{DirhookError, Result};
use crate::exec::command::PreparedCommand;

/// Longest chunk of command output logged as one line; longer lines are split.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    fn as_str(&self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        }
    }
}

/// Run the command to completion.
///
/// Both output streams are drained line by line into the log; the call only
/// returns once the process has exited *and* both streams hit EOF. Spawn
/// failures and unsuccessful exits are both returned as
/// [`DirhookError::CommandFailed`].
pub async fn run_prepared(prepared: &PreparedCommand) -> Result<()> {
    let program = prepared.program.display().to_string();
    info!(program = %program, args = ?prepared.args, cwd = ?prepared.working_dir, "starting command");

    let mut cmd = Command::new(&prepared.program);
    cmd.args(&prepared.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &prepared.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| DirhookError::CommandFailed(format!("spawning '{program}': {e}")))?;

    let stdout = child.stdout.take().ok_or_else(|| {
        DirhookError::CommandFailed(format!("no stdout pipe for '{program}'"))
    })?;
    let stderr = child.stderr.take().ok_or_else(|| {
        DirhookError::CommandFailed(format!("no stderr pipe for '{program}'"))
    })?;

    let stdout_task = forward_lines(stdout, OutputStream::Stdout, program.clone());
    let stderr_task = forward_lines(stderr, OutputStream::Stderr, program.clone());

    let status = child
        .wait()
        .await
        .map_err(|e| DirhookError::CommandFailed(format!("waiting for '{program}': {e}")))?;

    // Trailing output may still be in the pipes after exit.
    for task in [stdout_task, stderr_task] {
        if let Err(err) = task.await {
            warn!(program = %program, error = %err, "output forwarder task failed");
        }
    }

    info!(
        program = %program,
        exit_code = status.code().unwrap_or(-1),
        success = status.success(),
        "command exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(DirhookError::CommandFailed(format!(
            "'{program}' exited with {status}"
        )))
    }
}

/// Read one line from `reader` into `buf`, giving up on the newline once
/// `buf` holds `limit` bytes.
///
/// Returns the number of bytes consumed, `0` at EOF. The trailing newline,
/// if any, is kept in `buf`.
pub async fn read_bounded_line<R>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let limit = limit.max(1);
    let mut consumed = 0;

    while buf.len() < limit {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }

        let take = available.len().min(limit - buf.len());
        match available[..take].iter().position(|b| *b == b'\n') {
            Some(newline) => {
                buf.extend_from_slice(&available[..=newline]);
                reader.consume(newline + 1);
                return Ok(consumed + newline + 1);
            }
            None => {
                buf.extend_from_slice(&available[..take]);
                reader.consume(take);
                consumed += take;
            }
        }
    }

    Ok(consumed)
}

/// Forward every line of `pipe` to the log, tagged with its stream.
///
/// Invalid UTF-8 is replaced rather than aborting, so the pipe is always
/// read to EOF. Lines over [`MAX_LINE_BYTES`] are logged in pieces.
fn forward_lines<R>(pipe: R, stream: OutputStream, program: String) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match read_bounded_line(&mut reader, &mut buf, MAX_LINE_BYTES).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\r', '\n']);
                    info!(program = %program, stream = stream.as_str(), "{}", line);
                }
                Err(err) => {
                    warn!(program = %program, stream = stream.as_str(), error = %err, "error reading command output");
                    break;
                }
            }
        }

        debug!(program = %program, stream = stream.as_str(), "output stream closed");
    })
}

// src/exec/command.rs

//! Turning a configured token list into something spawnable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Argument token replaced by the task's file path.
pub const FILEPATH_PLACEHOLDER: &str = "{filepath}";

/// A command ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Directory containing the task's file; `None` for lifecycle commands.
    pub working_dir: Option<PathBuf>,
}

/// Resolve the executable and substitute the placeholder.
///
/// Returns `None` for an empty token list. Without a file path the
/// placeholder becomes an empty argument.
pub fn prepare_command(command: &[String], file_path: Option<&Path>) -> Option<PreparedCommand> {
    prepare_command_with(command, file_path, program_dir().as_deref())
}

/// Same as [`prepare_command`], with an explicit "next to the program" directory.
pub fn prepare_command_with(
    command: &[String],
    file_path: Option<&Path>,
    program_dir: Option<&Path>,
) -> Option<PreparedCommand> {
    let (executable, rest) = command.split_first()?;

    let program = resolve_executable_with(executable, program_dir);

    let args = rest
        .iter()
        .map(|arg| {
            if arg == FILEPATH_PLACEHOLDER {
                file_path
                    .map(|p| p.as_os_str().to_os_string())
                    .unwrap_or_default()
            } else {
                OsString::from(arg)
            }
        })
        .collect();

    let working_dir = file_path
        .and_then(|p| p.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf);

    Some(PreparedCommand {
        program,
        args,
        working_dir,
    })
}

/// Resolution order:
/// 1. an absolute path is used as-is,
/// 2. a file with that name next to the running program,
/// 3. a match on the command search path,
/// 4. otherwise the literal name (spawning will most likely fail).
pub fn resolve_executable_with(name: &str, program_dir: Option<&Path>) -> PathBuf {
    let as_path = Path::new(name);
    if as_path.is_absolute() {
        return as_path.to_path_buf();
    }

    if let Some(dir) = program_dir {
        let candidate = dir.join(name);
        if candidate.is_file() {
            debug!(?candidate, "resolved executable next to program");
            return candidate;
        }
    }

    if let Ok(found) = which::which(name) {
        debug!(path = ?found, "resolved executable on search path");
        return found;
    }

    debug!(name, "executable not found; passing name through");
    as_path.to_path_buf()
}

/// Directory containing the running program.
fn program_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

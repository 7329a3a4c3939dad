// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Make `path` absolute against the current working directory.
///
/// Falls back to the path as given (and logs) if the working directory
/// cannot be determined; callers match and key on whatever comes back.
pub fn absolutize(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(abs) => abs,
        Err(err) => {
            warn!(?path, error = %err, "could not make path absolute");
            path.to_path_buf()
        }
    }
}

/// Lower-cased extension of `path` without the leading dot, or `""`.
///
/// The extension is everything after the last `.` of the file name, so a
/// dotfile such as `.bashrc` has extension `bashrc` and `archive.tar.gz`
/// has `gz`.
pub fn lowercase_extension(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    name.rfind('.')
        .map(|dot| name[dot + 1..].to_lowercase())
        .unwrap_or_default()
}

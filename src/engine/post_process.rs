// src/engine/post_process.rs

//! What happens to a file after its command succeeded.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::errors::{DirhookError, Result};
use crate::fs::FileSystem;
use crate::types::PostProcessAction;
use crate::watch::path_utils::absolutize;

/// Apply the configured post-processing action to `path`.
///
/// An out-of-range `post_process` value surfaces here as
/// [`DirhookError::InvalidPostProcess`], which is fatal.
pub fn apply_post_process(fs: &dyn FileSystem, cfg: &Config, path: &Path) -> Result<()> {
    match cfg.post_process_action()? {
        PostProcessAction::DoNothing => {
            info!(?path, "post-processing: doing nothing");
            Ok(())
        }
        PostProcessAction::Move => {
            let dest = move_into_processed(fs, &cfg.processed_path, path)?;
            info!(?path, ?dest, "post-processing: moved file");
            Ok(())
        }
        PostProcessAction::Delete => {
            fs.remove_file(path)?;
            info!(?path, "post-processing: deleted file");
            Ok(())
        }
    }
}

/// Move `path` into `processed_dir`, keeping its base name. Returns the
/// destination path.
pub fn move_into_processed(
    fs: &dyn FileSystem,
    processed_dir: &Path,
    path: &Path,
) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        DirhookError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cannot move {path:?}: no file name"),
        ))
    })?;

    let dir = absolutize(processed_dir);
    fs.create_dir_all(&dir)?;

    let dest = dir.join(file_name);
    fs.rename(path, &dest)?;
    Ok(dest)
}

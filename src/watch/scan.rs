// src/watch/scan.rs

use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::engine::AppContext;
use crate::errors::Result;
use crate::types::{EventKind, TaskDescriptor};
use crate::watch::filters::{is_allowed_file_type, is_excluded_path};

/// Enqueue a synthetic Create task for every matching file under the root.
///
/// Excluded directories are not descended into. Files go through the same
/// debounce registry as live events. Returns the number of tasks queued.
pub async fn scan_existing_files(ctx: &Arc<AppContext>) -> Result<usize> {
    let cfg = ctx.config.snapshot();
    let root = ctx.root().to_path_buf();

    info!(?root, "processing existing files");

    let walker = WalkDir::new(&root).into_iter().filter_entry(|entry| {
        let excluded = is_excluded_path(entry.path(), &cfg.exclude_path);
        if excluded {
            info!(path = ?entry.path(), "skipping excluded path");
        }
        !excluded
    });

    let mut queued = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "error walking target directory");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_allowed_file_type(entry.path(), &cfg.file_type) {
            continue;
        }

        let task = TaskDescriptor::new(entry.path(), EventKind::Create)?;
        if !ctx.accept_debounced(task.path(), cfg.debounce_window()) {
            debug!(path = ?task.path(), "debouncing existing file");
            continue;
        }

        info!(path = ?task.path(), "processing existing file");
        ctx.queue.enqueue(task).await?;
        queued += 1;
    }

    Ok(queued)
}

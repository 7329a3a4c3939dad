// src/engine/worker.rs

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::engine::context::AppContext;
use crate::engine::post_process::apply_post_process;
use crate::engine::queue::TaskReceiver;
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::types::{EventKind, TaskDescriptor};

/// Pull tasks off the shared queue until it is closed and drained.
pub async fn run_worker(
    id: usize,
    rx: TaskReceiver,
    ctx: Arc<AppContext>,
    runner: Arc<dyn CommandRunner>,
) {
    debug!(worker = id, "worker started");

    loop {
        // Hold the lock for the receive only; execution runs unlocked.
        let task = {
            let mut guard = rx.lock().await;
            guard.recv().await
        };

        let Some(task) = task else {
            break;
        };

        if let Err(err) = process_task(id, &ctx, runner.as_ref(), &task).await {
            if err.is_fatal() {
                ctx.report_fatal(err);
            } else {
                error!(worker = id, path = ?task.path(), kind = %task.kind(), error = %err, "task failed");
            }
        }
    }

    debug!(worker = id, "task queue drained; worker exiting");
}

/// Run the command for one task and, on success, post-process the file.
///
/// The configuration snapshot is taken when the task is picked up, so a
/// reload mid-command does not affect it. Remove tasks skip post-processing.
pub async fn process_task(
    id: usize,
    ctx: &AppContext,
    runner: &dyn CommandRunner,
    task: &TaskDescriptor,
) -> Result<()> {
    let cfg = ctx.config.snapshot();
    let path = task.path();
    let command = cfg.command_for(task.kind());

    info!(worker = id, ?path, kind = %task.kind(), "processing task");
    runner.run(command, Some(path)).await?;

    if task.kind() == EventKind::Remove {
        return Ok(());
    }

    apply_post_process(ctx.fs.as_ref(), &cfg, path)
}

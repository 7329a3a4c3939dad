// src/engine/pool.rs

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::engine::context::AppContext;
use crate::engine::queue::TaskReceiver;
use crate::engine::worker::run_worker;
use crate::exec::CommandRunner;

/// Fixed-size set of workers sharing one task queue.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one).
    pub fn start(
        size: usize,
        rx: TaskReceiver,
        ctx: Arc<AppContext>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let size = size.max(1);
        info!(workers = size, "starting worker pool");

        let handles = (0..size)
            .map(|id| {
                let rx = Arc::clone(&rx);
                let ctx = Arc::clone(&ctx);
                let runner = Arc::clone(&runner);
                tokio::spawn(run_worker(id, rx, ctx, runner))
            })
            .collect();

        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to exit. Only returns once the queue is closed.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                warn!(error = %err, "worker task panicked or was cancelled");
            }
        }
    }

    /// Close the queue, let workers drain it and wait for them.
    pub async fn shutdown(self, ctx: &AppContext) {
        ctx.queue.close();
        self.join().await;
    }
}

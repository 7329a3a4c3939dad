// src/engine/queue.rs

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::{DirhookError, Result};
use crate::types::TaskDescriptor;

/// Default capacity of the task queue.
pub const TASK_QUEUE_CAPACITY: usize = 100;

/// Consumer side of the queue, shared by every worker.
///
/// Workers take the lock only for a single `recv`, so exactly one of them
/// receives any given task.
pub type TaskReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<TaskDescriptor>>>;

/// Producer side of the bounded FIFO between event dispatch and workers.
///
/// `enqueue` waits while the queue is full. [`close`](TaskQueue::close)
/// drops the stored sender: tasks already queued are still delivered, then
/// every worker sees the end of the stream and exits.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    tx: Arc<Mutex<Option<mpsc::Sender<TaskDescriptor>>>>,
}

/// Create a queue with the given capacity.
pub fn task_queue(capacity: usize) -> (TaskQueue, TaskReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        TaskQueue {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        Arc::new(tokio::sync::Mutex::new(rx)),
    )
}

impl TaskQueue {
    /// Queue a task, waiting for room if the queue is full.
    pub async fn enqueue(&self, task: TaskDescriptor) -> Result<()> {
        // Clone the sender so the lock is not held across the await.
        let tx = self.sender().ok_or(DirhookError::QueueClosed)?;
        debug!(path = ?task.path(), kind = %task.kind(), "enqueueing task");
        tx.send(task).await.map_err(|_| DirhookError::QueueClosed)
    }

    /// Stop accepting new tasks.
    pub fn close(&self) {
        let mut guard = self.tx.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            debug!("task queue closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender().is_none()
    }

    fn sender(&self) -> Option<mpsc::Sender<TaskDescriptor>> {
        let guard = self.tx.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }
}

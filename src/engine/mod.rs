// src/engine/mod.rs

//! Runtime engine for dirhook.
//!
//! This module ties together:
//! - the shared [`AppContext`] handed to every loop
//! - the bounded task queue between event dispatch and workers
//! - the worker pool and per-task post-processing
//! - the watcher health monitor
//! - the config reload loop
//!
//! Watching and classification live in `watch`; process spawning lives in
//! `exec`.

pub mod context;
pub mod health;
pub mod pool;
pub mod post_process;
pub mod queue;
pub mod reload;
pub mod worker;

pub use context::AppContext;
pub use health::{run_health_monitor, RootState};
pub use pool::WorkerPool;
pub use post_process::{apply_post_process, move_into_processed};
pub use queue::{task_queue, TaskQueue, TaskReceiver, TASK_QUEUE_CAPACITY};
pub use reload::{apply_reload, run_reload_loop};
pub use worker::{process_task, run_worker};

pub mod builders;
pub mod fake_runner;

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use dirhook::config::Config;
use dirhook::engine::{task_queue, AppContext, TaskReceiver, TASK_QUEUE_CAPACITY};
use dirhook::errors::DirhookError;
use dirhook::fs::FileSystem;

pub use builders::ConfigBuilder;
pub use fake_runner::{RecordedRun, RecordingRunner};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
#[allow(dead_code)]
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Poll `cond` every 20ms until it holds or `limit` elapses.
///
/// Returns whether the condition was met.
pub async fn wait_until<F>(limit: Duration, mut cond: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if cond() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// An `AppContext` wired to a fresh queue and fatal-error channel.
pub struct TestContext {
    pub ctx: Arc<AppContext>,
    pub rx: TaskReceiver,
    pub fatal_rx: mpsc::UnboundedReceiver<DirhookError>,
}

pub fn test_context(cfg: Config, root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> TestContext {
    let (queue, rx) = task_queue(TASK_QUEUE_CAPACITY);
    let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();
    let ctx = Arc::new(AppContext::new(cfg, root.into(), fs, queue, fatal_tx));
    TestContext { ctx, rx, fatal_rx }
}

/// Drain every task currently sitting in the queue without blocking.
pub async fn drain_queued(rx: &TaskReceiver) -> Vec<dirhook::types::TaskDescriptor> {
    let mut guard = rx.lock().await;
    let mut tasks = Vec::new();
    while let Ok(task) = guard.try_recv() {
        tasks.push(task);
    }
    tasks
}

// src/engine/context.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::{Config, LiveConfig};
use crate::engine::queue::TaskQueue;
use crate::errors::{DirhookError, Result};
use crate::fs::FileSystem;
use crate::watch::debounce::DebounceRegistry;
use crate::watch::dispatcher::run_dispatch_loop;
use crate::watch::registrar::WatchSession;

/// Shared state of a running dirhook instance.
///
/// Every long-lived loop (event dispatch, workers, health monitor, reload)
/// gets an `Arc<AppContext>`. Each mutable piece has its own lock:
/// - the debounce registry behind a `std::sync::Mutex` (never held across an await),
/// - the current watch session behind a `tokio::sync::Mutex`, which also
///   serializes every (re)initialization of the watch,
/// - the config behind [`LiveConfig`], which publishes whole snapshots.
#[derive(Debug)]
pub struct AppContext {
    pub config: LiveConfig,
    pub fs: Arc<dyn FileSystem>,
    pub queue: TaskQueue,
    root: PathBuf,
    debounce: Mutex<DebounceRegistry>,
    watch: tokio::sync::Mutex<Option<WatchSession>>,
    next_session_id: AtomicU64,
    fatal_tx: mpsc::UnboundedSender<DirhookError>,
}

impl AppContext {
    /// `root` is the absolute watch root; it stays fixed for the lifetime
    /// of the process.
    pub fn new(
        config: Config,
        root: PathBuf,
        fs: Arc<dyn FileSystem>,
        queue: TaskQueue,
        fatal_tx: mpsc::UnboundedSender<DirhookError>,
    ) -> Self {
        Self {
            config: LiveConfig::new(config),
            fs,
            queue,
            root,
            debounce: Mutex::new(DebounceRegistry::new()),
            watch: tokio::sync::Mutex::new(None),
            next_session_id: AtomicU64::new(1),
            fatal_tx,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lock-protected debounce test, shared by the event loop and the startup scan.
    pub fn accept_debounced(&self, path: &Path, window: Duration) -> bool {
        let mut registry = self
            .debounce
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.should_accept(path, window)
    }

    /// Report an error that must terminate the process.
    pub fn report_fatal(&self, err: DirhookError) {
        error!(error = %err, "fatal error");
        if self.fatal_tx.send(err).is_err() {
            debug!("fatal error channel closed; nobody left to report to");
        }
    }

    /// (Re)establish the watch on the root and start a dispatch loop bound to it.
    ///
    /// Any previous session is stopped first. Runs under the watch lock.
    pub async fn start_watch(self: &Arc<Self>) -> Result<()> {
        let mut guard = self.watch.lock().await;

        if let Some(mut old) = guard.take() {
            old.stop();
        }

        let id = self.next_session_id.fetch_add(1, Ordering::SeqCst);
        let (session, events) = WatchSession::start(id, &self.root)?;
        let stopped = session.stop_flag();
        *guard = Some(session);

        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            run_dispatch_loop(ctx, id, stopped, events).await;
        });

        Ok(())
    }

    /// Stop the current session, if any, and clear the handle.
    pub async fn stop_watch(&self) {
        let mut guard = self.watch.lock().await;
        if let Some(mut session) = guard.take() {
            session.stop();
        }
    }

    pub async fn is_watching(&self) -> bool {
        let guard = self.watch.lock().await;
        guard.as_ref().is_some_and(|s| !s.is_stopped())
    }

    /// Add a nested watch on behalf of the dispatch loop of session `session_id`.
    ///
    /// Failures are logged only. Requests from a loop whose session has been
    /// replaced are ignored.
    pub async fn watch_new_subtree(&self, session_id: u64, path: &Path) {
        let mut guard = self.watch.lock().await;
        match guard.as_mut() {
            Some(session) if session.id() == session_id => {
                if let Err(err) = session.watch_new_subtree(path) {
                    error!(?path, error = %err, "error watching new directory");
                }
            }
            _ => {
                info!(?path, session = session_id, "watch session replaced; not adding subtree");
            }
        }
    }
}

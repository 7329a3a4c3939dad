// src/watch/registrar.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;

/// Capacity of the channel between the notify callback and the dispatch loop.
pub const WATCH_EVENT_CAPACITY: usize = 100;

/// One live subscription to change notifications under a root.
///
/// Dropping or [`stop`](WatchSession::stop)ping the session drops the
/// underlying `RecommendedWatcher`, which closes the event channel handed
/// out by [`start`](WatchSession::start). The shared stop flag lets the
/// dispatch loop discard anything still buffered after the stop.
pub struct WatchSession {
    id: u64,
    root: PathBuf,
    watcher: Option<RecommendedWatcher>,
    stopped: Arc<AtomicBool>,
}

impl std::fmt::Debug for WatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSession")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl WatchSession {
    /// Subscribe recursively to changes under `root`.
    ///
    /// Events are forwarded into a bounded channel with a blocking send from
    /// notify's own thread, so a slow consumer throttles notification draining.
    pub fn start(id: u64, root: &Path) -> Result<(Self, mpsc::Receiver<Event>)> {
        let (event_tx, event_rx) = mpsc::channel::<Event>(WATCH_EVENT_CAPACITY);

        // Closure called synchronously by notify whenever an event arrives.
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event_tx.blocking_send(event).is_err() {
                        // Receiver gone: the session was stopped.
                        debug!("dropping notify event for closed watch session");
                    }
                }
                Err(err) => warn!(error = %err, "file watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(root, RecursiveMode::Recursive)?;

        info!(session = id, "file watcher started on {:?}", root);

        Ok((
            Self {
                id,
                root: root.to_path_buf(),
                watcher: Some(watcher),
                stopped: Arc::new(AtomicBool::new(false)),
            },
            event_rx,
        ))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Flag shared with the dispatch loop bound to this session.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stopped)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Add a nested recursive subscription for a newly discovered directory.
    ///
    /// Re-subscribing a path that is already covered is harmless.
    pub fn watch_new_subtree(&mut self, path: &Path) -> Result<()> {
        match self.watcher.as_mut() {
            Some(watcher) => {
                watcher.watch(path, RecursiveMode::Recursive)?;
                info!(session = self.id, "now watching new directory {:?}", path);
                Ok(())
            }
            None => {
                debug!(session = self.id, ?path, "ignoring subtree watch on stopped session");
                Ok(())
            }
        }
    }

    /// Cancel the subscription. Safe to call more than once.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        if self.watcher.take().is_some() {
            info!(session = self.id, "file watcher stopped on {:?}", self.root);
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.stop();
    }
}

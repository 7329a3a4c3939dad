// src/watch/debounce.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

/// Last accepted time per absolute path.
///
/// Entries are never pruned. The registry itself is not synchronized; the
/// owner (`AppContext`) keeps it behind a mutex so the event loop and the
/// bootstrap scan see the same history.
#[derive(Debug, Default)]
pub struct DebounceRegistry {
    last_accepted: HashMap<PathBuf, Instant>,
}

impl DebounceRegistry {
    pub fn new() -> Self {
        Self {
            last_accepted: HashMap::new(),
        }
    }

    /// Debounce test against the current time.
    pub fn should_accept(&mut self, path: &Path, window: Duration) -> bool {
        self.should_accept_at(path, window, Instant::now())
    }

    /// Accept (and record `now`) if the path was never accepted before or the
    /// last acceptance is at least `window` old.
    pub fn should_accept_at(&mut self, path: &Path, window: Duration, now: Instant) -> bool {
        match self.last_accepted.get(path) {
            Some(last) if now.saturating_duration_since(*last) < window => {
                debug!(?path, "event inside debounce window");
                false
            }
            _ => {
                self.last_accepted.insert(path.to_path_buf(), now);
                true
            }
        }
    }

    /// Number of paths with a recorded acceptance.
    pub fn tracked_paths(&self) -> usize {
        self.last_accepted.len()
    }
}

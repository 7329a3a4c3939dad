// src/config/live.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::model::Config;

/// The currently published configuration.
///
/// Readers always get a whole `Arc<Config>`; the reload loop swaps in a new
/// snapshot in one step, so nobody ever sees a half-updated config.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    tx: Arc<watch::Sender<Arc<Config>>>,
}

impl LiveConfig {
    pub fn new(config: Config) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(config));
        Self { tx: Arc::new(tx) }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Config> {
        self.tx.borrow().clone()
    }

    /// Replace the snapshot and return the previous one.
    pub fn publish(&self, config: Config) -> Arc<Config> {
        self.tx.send_replace(Arc::new(config))
    }

    /// Receiver that is notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Config>> {
        self.tx.subscribe()
    }
}

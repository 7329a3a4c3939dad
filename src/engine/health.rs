// src/engine/health.rs

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::engine::context::AppContext;

/// Whether the watched root was reachable at the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootState {
    Accessible,
    Inaccessible,
}

/// Periodically check that the watched root still exists, tearing the
/// watch down when it disappears and rebuilding it when it comes back.
///
/// The interval is re-read from the live config on every tick. Failing to
/// re-establish the watch is reported as fatal. Never returns otherwise.
pub async fn run_health_monitor(ctx: Arc<AppContext>) {
    let root = ctx.root().to_path_buf();
    info!(?root, "watcher health monitor started");

    loop {
        sleep(ctx.config.snapshot().check_interval()).await;

        if root_state(&ctx) == RootState::Accessible {
            debug!(?root, "watched root accessible");
            continue;
        }

        warn!(?root, "target directory is inaccessible; stopping watcher");
        ctx.stop_watch().await;

        wait_until_accessible(&ctx).await;

        info!(?root, "target directory is accessible again; reinitializing watcher");
        if let Err(err) = ctx.start_watch().await {
            ctx.report_fatal(err);
            return;
        }
        info!(?root, "watcher reinitialized");
    }
}

/// Poll at the configured interval until the root exists again.
async fn wait_until_accessible(ctx: &AppContext) {
    let root = ctx.root();
    while root_state(ctx) == RootState::Inaccessible {
        debug!(?root, "waiting for target directory");
        sleep(ctx.config.snapshot().check_interval()).await;
    }
}

pub fn root_state(ctx: &AppContext) -> RootState {
    if ctx.fs.exists(ctx.root()) {
        RootState::Accessible
    } else {
        RootState::Inaccessible
    }
}

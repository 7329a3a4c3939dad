// src/watch/dispatcher.rs

//! The event-dispatch loop: notify events in, tasks out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use notify::event::ModifyKind;
use notify::Event;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::AppContext;
use crate::errors::DirhookError;
use crate::types::{EventKind, FsEvent};
use crate::watch::classify::{classify, Decision, SkipReason};

/// Consume events of one watch session until it is stopped or its channel
/// closes.
///
/// The stop flag is checked before every event, so nothing buffered is
/// dispatched once the session has been stopped.
pub async fn run_dispatch_loop(
    ctx: Arc<AppContext>,
    session_id: u64,
    stopped: Arc<AtomicBool>,
    mut events: mpsc::Receiver<Event>,
) {
    info!(session = session_id, "event dispatch loop started");

    while let Some(event) = events.recv().await {
        if stopped.load(Ordering::SeqCst) {
            debug!(session = session_id, "watch session stopped; discarding events");
            break;
        }

        debug!(?event, "received notify event");

        for fs_event in fs_events_from_notify(&event) {
            if let Err(DirhookError::QueueClosed) = dispatch_event(&ctx, session_id, fs_event).await {
                info!(session = session_id, "task queue closed; stopping event dispatch");
                return;
            }
        }
    }

    debug!(session = session_id, "event dispatch loop finished");
}

/// Classify, debounce and enqueue a single event.
pub async fn dispatch_event(
    ctx: &AppContext,
    session_id: u64,
    event: FsEvent,
) -> crate::errors::Result<()> {
    let cfg = ctx.config.snapshot();
    let path = event.path();

    match classify(&cfg, ctx.fs.as_ref(), &event) {
        Decision::Skip(SkipReason::Excluded) => {
            info!(?path, kind = %event.kind(), "skipping excluded path");
        }
        Decision::Skip(SkipReason::StatFailed) => {
            warn!(?path, kind = %event.kind(), "error stating path; ignoring event");
        }
        Decision::Skip(reason) => {
            debug!(?path, kind = %event.kind(), ?reason, "event ignored");
        }
        Decision::WatchSubtree(dir) => {
            info!(path = ?dir, "detected new directory");
            ctx.watch_new_subtree(session_id, &dir).await;
        }
        Decision::Enqueue { task, debounce } => {
            if debounce && !ctx.accept_debounced(task.path(), cfg.debounce_window()) {
                info!(?path, kind = %event.kind(), "debouncing event");
                return Ok(());
            }
            info!(?path, kind = %event.kind(), "file event accepted");
            ctx.queue.enqueue(task).await?;
        }
    }

    Ok(())
}

/// Map a notify event onto zero or more pipeline events, one per path.
pub fn fs_events_from_notify(event: &Event) -> Vec<FsEvent> {
    let Some(kind) = event_kind_of(&event.kind) else {
        return Vec::new();
    };

    event
        .paths
        .iter()
        .filter_map(|path| match FsEvent::new(path, kind) {
            Ok(ev) => Some(ev),
            Err(err) => {
                warn!(?path, error = %err, "could not normalize event path");
                None
            }
        })
        .collect()
}

fn event_kind_of(kind: &notify::EventKind) -> Option<EventKind> {
    match kind {
        notify::EventKind::Create(_) => Some(EventKind::Create),
        notify::EventKind::Modify(ModifyKind::Name(_)) => Some(EventKind::Rename),
        notify::EventKind::Modify(ModifyKind::Metadata(_)) => None,
        notify::EventKind::Modify(_) => Some(EventKind::Write),
        notify::EventKind::Remove(_) => Some(EventKind::Remove),
        notify::EventKind::Access(_) | notify::EventKind::Any | notify::EventKind::Other => None,
    }
}

// src/watch/classify.rs

//! Turn a raw filesystem event into a decision for the dispatch loop.
//!
//! Classification is synchronous and side-effect free apart from stat calls
//! through [`FileSystem`]; the debounce test and the actual enqueue/subtree
//! registration are performed by the caller.

use std::path::PathBuf;

use crate::config::Config;
use crate::fs::FileSystem;
use crate::types::{EventKind, FsEvent, TaskDescriptor};
use crate::watch::filters::{is_allowed_file_type, is_excluded_path};

/// Why an event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Path matched an `exclude_path` pattern.
    Excluded,
    /// The path no longer exists (or cannot be stat'ed).
    StatFailed,
    /// Neither a directory nor a regular file.
    NotRegularFile,
    /// Extension is not in `file_type`.
    FileType,
    /// No command configured for this event kind.
    NoCommand,
}

/// What the dispatch loop should do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    /// A directory appeared; add a nested recursive watch.
    WatchSubtree(PathBuf),
    /// Queue the task, after the debounce test when `debounce` is true.
    Enqueue { task: TaskDescriptor, debounce: bool },
}

/// Classify one event against the current config snapshot.
///
/// Remove events skip the exclusion and extension filters and are never
/// debounced; the other kinds go through both filters.
pub fn classify(cfg: &Config, fs: &dyn FileSystem, event: &FsEvent) -> Decision {
    let path = event.path();

    match event.kind() {
        EventKind::Remove => {
            if cfg.onremove_run.is_empty() {
                return Decision::Skip(SkipReason::NoCommand);
            }
            Decision::Enqueue {
                task: TaskDescriptor::from_event(event),
                debounce: false,
            }
        }
        EventKind::Create | EventKind::Rename => {
            if is_excluded_path(path, &cfg.exclude_path) {
                return Decision::Skip(SkipReason::Excluded);
            }
            if !fs.exists(path) {
                return Decision::Skip(SkipReason::StatFailed);
            }
            if fs.is_dir(path) {
                return Decision::WatchSubtree(path.to_path_buf());
            }
            if !fs.is_file(path) {
                return Decision::Skip(SkipReason::NotRegularFile);
            }
            enqueue_if_configured(cfg, event)
        }
        EventKind::Write => {
            if is_excluded_path(path, &cfg.exclude_path) {
                return Decision::Skip(SkipReason::Excluded);
            }
            enqueue_if_configured(cfg, event)
        }
    }
}

fn enqueue_if_configured(cfg: &Config, event: &FsEvent) -> Decision {
    if !is_allowed_file_type(event.path(), &cfg.file_type) {
        return Decision::Skip(SkipReason::FileType);
    }
    if cfg.command_for(event.kind()).is_empty() {
        return Decision::Skip(SkipReason::NoCommand);
    }
    Decision::Enqueue {
        task: TaskDescriptor::from_event(event),
        debounce: true,
    }
}

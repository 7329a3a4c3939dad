// src/watch/mod.rs

//! File watching and event classification.
//!
//! This module is responsible for:
//! - Subscribing to recursive change notifications (`notify`) per watch session.
//! - Filtering events by exclusion pattern and extension.
//! - Debouncing repeated events for the same path.
//! - Turning accepted events into tasks on the queue.
//! - Walking the root once at startup for pre-existing files.
//!
//! It does **not** run commands; workers in `engine` do that.

pub mod classify;
pub mod debounce;
pub mod dispatcher;
pub mod filters;
pub mod path_utils;
pub mod registrar;
pub mod scan;

pub use classify::{classify, Decision, SkipReason};
pub use debounce::DebounceRegistry;
pub use dispatcher::{dispatch_event, fs_events_from_notify, run_dispatch_loop};
pub use filters::{is_allowed_file_type, is_excluded_path};
pub use registrar::WatchSession;
pub use scan::scan_existing_files;

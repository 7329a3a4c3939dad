// src/exec/mod.rs

//! Command execution layer.
//!
//! - [`command`] resolves the executable and substitutes `{filepath}`.
//! - [`runner`] spawns the process and forwards its output to the log.
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `ProcessRunner`; tests replace it with a fake.
//! - [`lifecycle`] runs the `init_run` / `exit_run` hooks.

pub mod backend;
pub mod command;
pub mod lifecycle;
pub mod runner;

pub use backend::{CommandRunner, ProcessRunner};
pub use command::{prepare_command, PreparedCommand, FILEPATH_PLACEHOLDER};
pub use lifecycle::{run_exit_command, run_init_command};
pub use runner::{read_bounded_line, MAX_LINE_BYTES};

// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Workers and lifecycle hooks talk to a `CommandRunner` instead of spawning
//! processes directly. This makes it easy to swap in a recording fake in
//! tests while keeping the production implementation in [`runner`].
//!
//! [`runner`]: super::runner

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::debug;

use crate::errors::Result;
use crate::exec::command::prepare_command;
use crate::exec::runner::run_prepared;

/// Trait abstracting how a configured command is executed.
///
/// `file_path` is the task's file, or `None` for lifecycle commands.
/// An empty `command` must succeed without doing anything.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        command: &'a [String],
        file_path: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Real runner used in production: resolves the executable and spawns it.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        command: &'a [String],
        file_path: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let Some(prepared) = prepare_command(command, file_path) else {
                debug!("skipping execution of empty command");
                return Ok(());
            };
            run_prepared(&prepared).await
        })
    }
}

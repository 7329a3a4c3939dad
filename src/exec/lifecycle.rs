// src/exec/lifecycle.rs

//! `init_run` / `exit_run` hooks.

use tracing::{error, info};

use crate::config::Config;
use crate::errors::Result;
use crate::exec::backend::CommandRunner;

/// Run `init_run`, if configured. A failure here aborts startup.
pub async fn run_init_command(runner: &dyn CommandRunner, cfg: &Config) -> Result<()> {
    if cfg.init_run.is_empty() {
        return Ok(());
    }
    info!("executing initialization command");
    runner.run(&cfg.init_run, None).await
}

/// Run `exit_run`, if configured. Failures are logged only.
pub async fn run_exit_command(runner: &dyn CommandRunner, cfg: &Config) {
    if cfg.exit_run.is_empty() {
        return;
    }
    info!("executing termination command");
    if let Err(err) = runner.run(&cfg.exit_run, None).await {
        error!(error = %err, "error executing termination command");
    }
}

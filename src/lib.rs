// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod signals;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::cli::CliArgs;
use crate::config::{load_or_init, Config};
use crate::engine::{
    run_health_monitor, run_reload_loop, task_queue, AppContext, WorkerPool, TASK_QUEUE_CAPACITY,
};
use crate::errors::DirhookError;
use crate::exec::{run_exit_command, run_init_command, CommandRunner, ProcessRunner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::path_utils::absolutize;
use crate::watch::scan_existing_files;

/// How the pipeline runs once everything is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Watch the target directory until a signal or a fatal error.
    Watch,
    /// Process the files already present, then exit.
    Once,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (writing defaults if the file is missing)
/// - logging
/// - the real filesystem and process runner
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let config_path = args.config_path();

    let loaded = load_or_init(fs.as_ref(), &config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    logging::init_logging(args.log_level, &loaded.config)?;

    if loaded.created_default {
        info!(path = ?config_path, "config file not found; created one with default settings");
    }

    if args.dry_run {
        print_dry_run(&config_path, &loaded.config);
        return Ok(());
    }

    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new());
    let mode = if args.once { RunMode::Once } else { RunMode::Watch };

    run_with(loaded.config, config_path, fs, runner, mode).await
}

/// Run the pipeline with an already loaded config and explicit collaborators.
///
/// `config_path` is the source the reload loop re-reads.
pub async fn run_with(
    cfg: Config,
    config_path: PathBuf,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn CommandRunner>,
    mode: RunMode,
) -> Result<()> {
    let root = prepare_target_dir(fs.as_ref(), &cfg.target_path)?;
    info!(?root, workers = cfg.worker_count(), ?mode, "starting dirhook");

    run_init_command(runner.as_ref(), &cfg)
        .await
        .context("running init command")?;

    let (queue, rx) = task_queue(TASK_QUEUE_CAPACITY);
    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel::<DirhookError>();
    let pool_size = cfg.worker_count();
    let process_on_start = cfg.process_on_start;
    let ctx = Arc::new(AppContext::new(cfg, root, fs, queue, fatal_tx));

    if mode == RunMode::Once {
        let pool = WorkerPool::start(pool_size, rx, Arc::clone(&ctx), Arc::clone(&runner));
        let scanned = scan_existing_files(&ctx).await;
        pool.shutdown(&ctx).await;
        run_exit_command(runner.as_ref(), &ctx.config.snapshot()).await;

        let queued = scanned.context("processing existing files")?;
        if let Ok(err) = fatal_rx.try_recv() {
            return Err(err.into());
        }
        info!(tasks = queued, "all existing files processed; exiting");
        return Ok(());
    }

    // Listen for signals before anything long-running starts.
    let mut shutdown = tokio::spawn(signals::wait_for_shutdown_signal());

    ctx.start_watch().await.context("starting directory watch")?;
    info!(root = ?ctx.root(), "watching directory");

    let _pool = WorkerPool::start(pool_size, rx, Arc::clone(&ctx), Arc::clone(&runner));

    if process_on_start {
        let scan_ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            match scan_existing_files(&scan_ctx).await {
                Ok(queued) => debug!(tasks = queued, "existing files queued"),
                Err(err) => error!(error = %err, "error processing existing files"),
            }
        });
    }

    if ctx.config.snapshot().reload_interval().is_some() {
        tokio::spawn(run_reload_loop(Arc::clone(&ctx), config_path));
    }

    tokio::spawn(run_health_monitor(Arc::clone(&ctx)));

    tokio::select! {
        res = &mut shutdown => {
            match res {
                Ok(Ok(())) => {}
                Ok(Err(err)) => return Err(anyhow!(err).context("listening for shutdown signal")),
                Err(err) => return Err(anyhow!(err).context("signal listener task failed")),
            }
            info!("shutdown requested");
            ctx.stop_watch().await;
            run_exit_command(runner.as_ref(), &ctx.config.snapshot()).await;
            Ok(())
        }
        fatal = fatal_rx.recv() => {
            ctx.stop_watch().await;
            match fatal {
                Some(err) => Err(err.into()),
                None => Err(anyhow!("fatal error channel closed unexpectedly")),
            }
        }
    }
}

/// Create the target directory if needed and return its absolute path.
fn prepare_target_dir(fs: &dyn FileSystem, target: &Path) -> Result<PathBuf> {
    if !fs.exists(target) {
        fs.create_dir_all(target)
            .with_context(|| format!("creating target directory {}", target.display()))?;
        info!(path = ?target, "created target directory");
    }
    Ok(absolutize(target))
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(config_path: &Path, cfg: &Config) {
    println!("dirhook dry-run");
    println!("  config file = {}", config_path.display());
    println!("  target_path = {}", cfg.target_path.display());
    println!("  processed_path = {}", cfg.processed_path.display());
    println!(
        "  max_workers = {} (effective {})",
        cfg.max_workers,
        cfg.worker_count()
    );
    println!("  post_process = {}", cfg.post_process);
    if !cfg.file_type.is_empty() {
        println!("  file_type = {:?}", cfg.file_type);
    }
    if !cfg.exclude_path.is_empty() {
        println!("  exclude_path = {:?}", cfg.exclude_path);
    }
    println!("  process_on_start = {}", cfg.process_on_start);
    println!("  debounce = {}ms", cfg.debounce);
    println!("  reload_config = {}ms", cfg.reload_config);
    println!("  check_interval = {}s", cfg.check_interval);
    if cfg.enable_logging {
        println!("  logfile_path = {}", cfg.logfile_path.display());
    }
    println!();

    println!("commands:");
    let commands = [
        ("init_run", &cfg.init_run),
        ("exit_run", &cfg.exit_run),
        ("oncreate_run", &cfg.oncreate_run),
        ("onmodify_run", &cfg.onmodify_run),
        ("onrename_run", &cfg.onrename_run),
        ("onremove_run", &cfg.onremove_run),
    ];
    for (name, cmd) in commands {
        if !cmd.is_empty() {
            println!("  - {name}: {}", cmd.join(" "));
        }
    }

    debug!("dry-run complete (no execution)");
}

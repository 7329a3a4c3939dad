// src/engine/reload.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{diff_configs, load_or_init, Config, FieldChange, LiveConfig};
use crate::engine::context::AppContext;

/// Fields that are read once at startup; changing them needs a restart.
const RESTART_ONLY_FIELDS: &[&str] = &["target_path", "max_workers", "logfile_path", "enable_logging"];

/// Reload the config file every `reload_config` milliseconds and publish
/// the result.
///
/// Returns immediately when reloading is disabled, and returns once a
/// reload sets `reload_config` to 0. Load or parse failures are reported
/// as fatal.
pub async fn run_reload_loop(ctx: Arc<AppContext>, source: PathBuf) {
    let Some(mut period) = ctx.config.snapshot().reload_interval() else {
        debug!("config reloading disabled");
        return;
    };

    info!(path = ?source, period_ms = period.as_millis() as u64, "config reload loop started");
    let mut ticker = reload_ticker(period);

    loop {
        ticker.tick().await;

        let loaded = match load_or_init(ctx.fs.as_ref(), &source) {
            Ok(loaded) => loaded,
            Err(err) => {
                ctx.report_fatal(err);
                return;
            }
        };
        if loaded.created_default {
            warn!(path = ?source, "config file was missing; wrote defaults");
        }

        apply_reload(&ctx.config, loaded.config);

        match ctx.config.snapshot().reload_interval() {
            None => {
                info!("reload_config set to 0; stopping config reload loop");
                return;
            }
            Some(new_period) if new_period != period => {
                info!(
                    old_ms = period.as_millis() as u64,
                    new_ms = new_period.as_millis() as u64,
                    "reload interval changed; restarting timer"
                );
                period = new_period;
                ticker = reload_ticker(period);
            }
            Some(_) => {}
        }
    }
}

/// Diff `new` against the current snapshot, log every changed field and
/// publish `new` as a whole.
pub fn apply_reload(live: &LiveConfig, new: Config) -> Vec<FieldChange> {
    let old = live.snapshot();
    let changes = diff_configs(&old, &new);

    for change in &changes {
        info!(
            field = change.field,
            old = %change.old,
            new = %change.new,
            "config change detected"
        );
        if RESTART_ONLY_FIELDS.contains(&change.field) {
            warn!(field = change.field, "change takes effect after restart");
        }
    }

    if !changes.is_empty() {
        live.publish(new);
    }

    changes
}

fn reload_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

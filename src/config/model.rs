// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::{EventKind, PostProcessAction};

/// Settings snapshot as read from the TOML config file.
///
/// Every key is optional; missing keys fall back to [`Config::default`].
///
/// ```toml
/// target_path = "incoming"
/// processed_path = "completed"
/// max_workers = 2
/// post_process = 1
/// file_type = [".txt", ".csv"]
/// oncreate_run = ["convert", "{filepath}"]
/// debounce = 100
/// exclude_path = ["*/tmp/*"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory that is watched recursively.
    pub target_path: PathBuf,

    /// Destination directory for `post_process = 1`.
    pub processed_path: PathBuf,

    /// Worker pool size; `<= 0` means one worker per available CPU.
    pub max_workers: i64,

    /// `0` = do nothing, `1` = move, `-1` = delete.
    ///
    /// Kept as the raw number: an unknown value is only an error once a
    /// worker actually needs it.
    pub post_process: i64,

    /// Extension allow-list (e.g. `".txt"`); empty admits every file.
    pub file_type: Vec<String>,

    /// Enqueue a Create task for every matching file already present at startup.
    pub process_on_start: bool,

    pub logfile_path: PathBuf,
    pub enable_logging: bool,

    /// Lifecycle commands, run without an associated file.
    pub init_run: Vec<String>,
    pub exit_run: Vec<String>,

    /// Per-event command templates; `{filepath}` is replaced by the file path.
    pub oncreate_run: Vec<String>,
    pub onmodify_run: Vec<String>,
    pub onrename_run: Vec<String>,
    pub onremove_run: Vec<String>,

    /// Debounce window in milliseconds.
    pub debounce: u64,

    /// Exclusion patterns; `*` is stripped before matching.
    pub exclude_path: Vec<String>,

    /// Reload period in milliseconds; `0` disables reloading.
    pub reload_config: u64,

    /// Health check period in seconds.
    pub check_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from("targetpath"),
            processed_path: PathBuf::from("completed"),
            max_workers: 1,
            post_process: 0,
            file_type: Vec::new(),
            process_on_start: true,
            logfile_path: PathBuf::from("dirhook.log"),
            enable_logging: false,
            init_run: Vec::new(),
            exit_run: Vec::new(),
            oncreate_run: Vec::new(),
            onmodify_run: Vec::new(),
            onrename_run: Vec::new(),
            onremove_run: Vec::new(),
            debounce: 100,
            exclude_path: Vec::new(),
            reload_config: 0,
            check_interval: 5,
        }
    }
}

impl Config {
    /// Command template configured for the given event kind.
    pub fn command_for(&self, kind: EventKind) -> &[String] {
        match kind {
            EventKind::Create => &self.oncreate_run,
            EventKind::Rename => &self.onrename_run,
            EventKind::Write => &self.onmodify_run,
            EventKind::Remove => &self.onremove_run,
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce)
    }

    /// `None` when reloading is disabled.
    pub fn reload_interval(&self) -> Option<Duration> {
        (self.reload_config > 0).then(|| Duration::from_millis(self.reload_config))
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }

    /// Effective pool size.
    pub fn worker_count(&self) -> usize {
        if self.max_workers <= 0 {
            num_cpus::get()
        } else {
            self.max_workers as usize
        }
    }

    pub fn post_process_action(&self) -> Result<PostProcessAction> {
        PostProcessAction::try_from(self.post_process)
    }
}

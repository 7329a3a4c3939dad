#![allow(dead_code)]

use std::path::PathBuf;

use dirhook::config::Config;

/// Builder for `Config` to simplify test setup.
///
/// Starts from the defaults with bootstrap processing turned off, so a
/// test only gets the tasks it asks for.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                process_on_start: false,
                ..Config::default()
            },
        }
    }

    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target_path = path.into();
        self
    }

    pub fn processed(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.processed_path = path.into();
        self
    }

    pub fn workers(mut self, n: i64) -> Self {
        self.config.max_workers = n;
        self
    }

    pub fn post_process(mut self, value: i64) -> Self {
        self.config.post_process = value;
        self
    }

    pub fn file_types(mut self, types: &[&str]) -> Self {
        self.config.file_type = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.exclude_path.push(pattern.to_string());
        self
    }

    pub fn process_on_start(mut self, val: bool) -> Self {
        self.config.process_on_start = val;
        self
    }

    pub fn on_create(mut self, cmd: &[&str]) -> Self {
        self.config.oncreate_run = to_tokens(cmd);
        self
    }

    pub fn on_modify(mut self, cmd: &[&str]) -> Self {
        self.config.onmodify_run = to_tokens(cmd);
        self
    }

    pub fn on_rename(mut self, cmd: &[&str]) -> Self {
        self.config.onrename_run = to_tokens(cmd);
        self
    }

    pub fn on_remove(mut self, cmd: &[&str]) -> Self {
        self.config.onremove_run = to_tokens(cmd);
        self
    }

    pub fn init_run(mut self, cmd: &[&str]) -> Self {
        self.config.init_run = to_tokens(cmd);
        self
    }

    pub fn exit_run(mut self, cmd: &[&str]) -> Self {
        self.config.exit_run = to_tokens(cmd);
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.debounce = ms;
        self
    }

    pub fn reload_ms(mut self, ms: u64) -> Self {
        self.config.reload_config = ms;
        self
    }

    pub fn check_interval_secs(mut self, secs: u64) -> Self {
        self.config.check_interval = secs;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_tokens(cmd: &[&str]) -> Vec<String> {
    cmd.iter().map(|s| s.to_string()).collect()
}

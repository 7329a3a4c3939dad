// src/config/diff.rs

use std::fmt::Debug;

use crate::config::model::Config;

/// One field whose value differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

/// Compare two snapshots field by field.
///
/// The field list is fixed by [`Config`]; adding a field there means adding
/// a line here.
pub fn diff_configs(old: &Config, new: &Config) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    compare(&mut changes, "target_path", &old.target_path, &new.target_path);
    compare(&mut changes, "processed_path", &old.processed_path, &new.processed_path);
    compare(&mut changes, "max_workers", &old.max_workers, &new.max_workers);
    compare(&mut changes, "post_process", &old.post_process, &new.post_process);
    compare(&mut changes, "file_type", &old.file_type, &new.file_type);
    compare(&mut changes, "process_on_start", &old.process_on_start, &new.process_on_start);
    compare(&mut changes, "logfile_path", &old.logfile_path, &new.logfile_path);
    compare(&mut changes, "enable_logging", &old.enable_logging, &new.enable_logging);
    compare(&mut changes, "init_run", &old.init_run, &new.init_run);
    compare(&mut changes, "exit_run", &old.exit_run, &new.exit_run);
    compare(&mut changes, "oncreate_run", &old.oncreate_run, &new.oncreate_run);
    compare(&mut changes, "onmodify_run", &old.onmodify_run, &new.onmodify_run);
    compare(&mut changes, "onrename_run", &old.onrename_run, &new.onrename_run);
    compare(&mut changes, "onremove_run", &old.onremove_run, &new.onremove_run);
    compare(&mut changes, "debounce", &old.debounce, &new.debounce);
    compare(&mut changes, "exclude_path", &old.exclude_path, &new.exclude_path);
    compare(&mut changes, "reload_config", &old.reload_config, &new.reload_config);
    compare(&mut changes, "check_interval", &old.check_interval, &new.check_interval);

    changes
}

fn compare<T: PartialEq + Debug>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    old: &T,
    new: &T,
) {
    if old != new {
        changes.push(FieldChange {
            field,
            old: format!("{old:?}"),
            new: format!("{new:?}"),
        });
    }
}

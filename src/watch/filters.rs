// src/watch/filters.rs

//! Path filters shared by the event classifier and the bootstrap scan.

use std::path::Path;

use crate::watch::path_utils::lowercase_extension;

/// Returns true if `path` hits any exclusion pattern.
///
/// Each pattern has its `*` characters removed and surrounding whitespace
/// trimmed. The path is excluded when it equals the cleaned pattern or
/// contains it, both compared case-insensitively. A pattern that is empty
/// after cleaning (such as `"*"`) matches every path.
pub fn is_excluded_path(path: &Path, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_lower = path.to_string_lossy().to_lowercase();

    patterns.iter().any(|pattern| {
        let cleaned = pattern.replace('*', "");
        let cleaned = cleaned.trim().to_lowercase();
        path_lower == cleaned || path_lower.contains(&cleaned)
    })
}

/// Returns true if the file's extension is in `allowed`.
///
/// An empty list admits everything. Entries may be written with or without
/// the leading dot (`".txt"` and `"txt"` are equivalent); matching ignores case.
/// A dotfile's whole name counts as its extension, so `".bashrc"` admits
/// `/watch/.bashrc`.
pub fn is_allowed_file_type(path: &Path, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let ext = lowercase_extension(path);
    allowed
        .iter()
        .any(|candidate| candidate.trim().trim_start_matches('.').to_lowercase() == ext)
}

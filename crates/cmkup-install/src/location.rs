use std::path::{Path, PathBuf};

/// Turn a tool id or name into a single safe path component.
///
/// Every run of characters outside `[A-Za-z0-9_.-]` becomes one `_`. Results
/// that would name the current or parent directory are replaced by `_`.
pub fn sanitize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_run = false;
    for c in key.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    if matches!(out.as_str(), "" | "." | "..") {
        return "_".to_string();
    }
    out
}

pub(crate) fn install_dir(tools_root: &Path, key: &str) -> PathBuf {
    tools_root.join(sanitize(key))
}

pub(crate) fn lock_file(tools_root: &Path, key: &str) -> PathBuf {
    tools_root.join(format!("{}.lock", sanitize(key)))
}

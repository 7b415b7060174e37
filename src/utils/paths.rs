//! Path utilities
//!
//! Lake paths are relative to the container root and always use `/` as the
//! segment separator, whatever the host convention is.

use std::path::MAIN_SEPARATOR;

/// Returns true if the path addresses the container root
pub fn is_root(path: &str) -> bool {
    let trimmed = path.trim();
    trimmed.is_empty() || trimmed == "/"
}

/// Replace native separators with `/`
pub fn normalize_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Non-empty `/`-delimited segments of a path
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Splits a file path into its directory portion and file name
pub fn split_file_path(path: &str) -> (String, String) {
    let normalized = normalize_separators(path);
    let trimmed = normalized.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((dir, file)) => (dir.to_string(), file.to_string()),
        None => (String::new(), trimmed.to_string()),
    }
}

/// Last segment of a path
pub fn leaf_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Parent of a path; root-level entries have `/` as their parent
pub fn parent_directory(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        _ => "/".to_string(),
    }
}

/// Joins a directory (None for root) and a child name without leading slash
pub fn join(directory: Option<&str>, name: &str) -> String {
    format!("{}/{}", directory.unwrap_or(""), name)
        .trim_start_matches('/')
        .to_string()
}

/// Combines a base URL and a relative path with exactly one `/` between parts
pub fn combine_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

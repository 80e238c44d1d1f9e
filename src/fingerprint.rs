// src/fingerprint.rs
//! Content-based violation identity.
//!
//! The fingerprint is the sole deduplication mechanism: two occurrences of
//! the same defect at the same location in the same content always hash
//! identically. No incremental IDs are used anywhere.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Computes the fingerprint for a violation: SHA-256 over
/// `path:severityLabel:message:(line+column)`, hex-encoded lowercase.
#[must_use]
pub fn fingerprint(
    relative_path: &str,
    severity_label: &str,
    message: &str,
    line: u32,
    column: u32,
) -> String {
    let key = format!("{relative_path}:{severity_label}:{message}:{}", line + column);

    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Relativizes an absolute file path against the repository root and
/// normalizes separators to `/` regardless of host conventions.
/// Paths outside the root are returned normalized but unrelativized.
#[must_use]
pub fn relative_path(repo_root: &Path, file_path: &str) -> String {
    let normalized = normalize_separators(file_path);
    let root = normalize_separators(&repo_root.to_string_lossy());
    let root = root.trim_end_matches('/');

    match normalized.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') || rest.is_empty() => {
            rest.trim_start_matches('/').to_string()
        }
        _ => normalized,
    }
}

/// Replaces `\` with `/` for Windows compatibility.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

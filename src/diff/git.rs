// src/diff/git.rs
//! Thin shim over the `git` CLI.
//!
//! The engine only needs ref resolution, merge-base and a unified-0 diff,
//! so a subprocess shim keeps the surface narrow and avoids carrying a VCS
//! library. All commands run with the repository root as working directory.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Checks if a usable `git` binary is on the PATH.
#[must_use]
pub fn is_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Checks if `root` is inside a git working tree.
#[must_use]
pub fn in_repo(root: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(root)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Resolves a revision to its commit id.
///
/// # Errors
/// Returns error if the revision cannot be resolved.
pub fn rev_parse(root: &Path, rev: &str) -> Result<String> {
    run_git(root, &["rev-parse", "--verify", "--quiet", rev])
        .with_context(|| format!("could not resolve git ref: {rev}"))
}

/// Returns the short name of the upstream tracking ref of the current
/// branch (e.g. `origin/main`).
///
/// # Errors
/// Returns error if no upstream is configured or HEAD is detached.
pub fn upstream_ref(root: &Path) -> Result<String> {
    run_git(
        root,
        &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"],
    )
    .context("no upstream branch configured for the current branch")
}

/// Computes the nearest common ancestor of two revisions.
///
/// # Errors
/// Returns error if the revisions share no ancestor or cannot be resolved.
pub fn merge_base(root: &Path, a: &str, b: &str) -> Result<String> {
    run_git(root, &["merge-base", a, b])
        .with_context(|| format!("could not compute merge base of {a} and {b}"))
}

/// Produces a zero-context diff with rename detection, restricted to
/// added/modified/renamed files. With `target = None` the diff is taken
/// against the working tree.
///
/// # Errors
/// Returns error if git fails, e.g. on an unresolvable revision.
pub fn diff_unified0(root: &Path, base: &str, target: Option<&str>) -> Result<String> {
    let mut args = vec![
        "diff",
        "-U0",
        "-M",
        "--diff-filter=AMR",
        "--no-color",
        base,
    ];

    if let Some(target) = target {
        args.push(target);
    }

    run_git_raw(root, &args)
}

fn run_git(root: &Path, args: &[&str]) -> Result<String> {
    run_git_raw(root, args).map(|out| out.trim().to_string())
}

fn run_git_raw(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

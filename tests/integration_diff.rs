// tests/integration_diff.rs
//! Integration tests for the diff engine against real scratch repositories.
//!
//! VERIFICATION STRATEGY:
//! 1. Each diff mode (committed, working-tree, union) on a real repo.
//! 2. Ref resolution: explicit refs, upstream tracking + merge base.
//! 3. Degradation: missing upstream and non-repos yield "no coverage data".
//!
//! Every test skips itself when no `git` binary is available.

use diffgate_core::diff::{changed_lines, git, DiffMode, DiffRequest};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// --- Helpers ---

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should be runnable");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo(dir: &Path) {
    run_git(dir, &["init", "--quiet"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
}

fn write_numbered(dir: &Path, name: &str, total: u32) {
    let content: String = (1..=total).map(|i| format!("line {i}\n")).collect();
    fs::write(dir.join(name), content).expect("write file");
}

/// Rewrites `name` with lines `changed` (1-based, inclusive) replaced.
fn change_lines(dir: &Path, name: &str, total: u32, changed: (u32, u32)) {
    let content: String = (1..=total)
        .map(|i| {
            if i >= changed.0 && i <= changed.1 {
                format!("changed {i}\n")
            } else {
                format!("line {i}\n")
            }
        })
        .collect();
    fs::write(dir.join(name), content).expect("write file");
}

fn commit_all(dir: &Path, message: &str) {
    run_git(dir, &["add", "-A"]);
    run_git(dir, &["commit", "--quiet", "-m", message]);
}

// --- Tests ---

#[test]
fn test_committed_only_with_explicit_base() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");
    let base = run_git(dir, &["rev-parse", "HEAD"]);

    change_lines(dir, "App.java", 30, (10, 12));
    commit_all(dir, "change lines 10-12");

    let request = DiffRequest {
        base: Some(base),
        target: None,
        mode: DiffMode::CommittedOnly,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(!ranges.covers("App.java", 9));
    assert!(ranges.covers("App.java", 10));
    assert!(ranges.covers("App.java", 11));
    assert!(ranges.covers("App.java", 12));
    assert!(!ranges.covers("App.java", 13));
}

#[test]
fn test_working_tree_only_sees_uncommitted_edits() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");

    change_lines(dir, "App.java", 30, (20, 20));

    let request = DiffRequest {
        base: None,
        target: None,
        mode: DiffMode::WorkingTreeOnly,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(ranges.covers("App.java", 20));
    assert!(!ranges.covers("App.java", 19));
    assert!(!ranges.covers("App.java", 21));
}

#[test]
fn test_union_mode_combines_committed_and_working_tree() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");
    let base = run_git(dir, &["rev-parse", "HEAD"]);

    change_lines(dir, "App.java", 30, (10, 12));
    commit_all(dir, "committed change");

    // Uncommitted edit on top.
    let committed = fs::read_to_string(dir.join("App.java")).expect("read");
    let edited: String = committed
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i + 1 == 20 {
                "uncommitted 20\n".to_string()
            } else {
                format!("{line}\n")
            }
        })
        .collect();
    fs::write(dir.join("App.java"), edited).expect("write");

    let request = DiffRequest {
        base: Some(base),
        target: None,
        mode: DiffMode::CommittedPlusWorkingTree,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(ranges.covers("App.java", 10));
    assert!(ranges.covers("App.java", 12));
    assert!(ranges.covers("App.java", 20));
    assert!(!ranges.covers("App.java", 25));
}

#[test]
fn test_upstream_tracking_with_merge_base() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");
    run_git(dir, &["branch", "-M", "main"]);

    run_git(dir, &["checkout", "--quiet", "-b", "feature"]);
    change_lines(dir, "App.java", 30, (10, 12));
    commit_all(dir, "feature change");

    // Advance main past the merge base; those commits must not be flagged.
    run_git(dir, &["checkout", "--quiet", "main"]);
    write_numbered(dir, "Other.java", 5);
    commit_all(dir, "main-only change");
    run_git(dir, &["checkout", "--quiet", "feature"]);

    run_git(dir, &["branch", "--set-upstream-to=main"]);

    let request = DiffRequest {
        base: None,
        target: None,
        mode: DiffMode::CommittedOnly,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(ranges.covers("App.java", 10));
    assert!(ranges.covers("App.java", 12));
    assert!(ranges.ranges("Other.java").is_none());
}

#[test]
fn test_rename_records_ranges_under_new_path() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");
    let base = run_git(dir, &["rev-parse", "HEAD"]);

    run_git(dir, &["mv", "App.java", "Renamed.java"]);
    change_lines(dir, "Renamed.java", 30, (5, 5));
    commit_all(dir, "rename and tweak");

    let request = DiffRequest {
        base: Some(base),
        target: None,
        mode: DiffMode::CommittedOnly,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(ranges.covers("Renamed.java", 5));
    assert!(ranges.ranges("App.java").is_none());
}

#[test]
fn test_missing_upstream_degrades_to_no_coverage() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    commit_all(dir, "initial");
    change_lines(dir, "App.java", 30, (10, 12));
    commit_all(dir, "second");

    // No upstream configured and no explicit base: the engine must not
    // guess a default branch name.
    let request = DiffRequest {
        base: None,
        target: None,
        mode: DiffMode::CommittedOnly,
    };

    assert!(changed_lines(dir, &request).is_none());
}

#[test]
fn test_non_repository_degrades_to_no_coverage() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");

    assert!(changed_lines(tmp.path(), &DiffRequest::default()).is_none());
}

#[test]
fn test_deleted_file_contributes_no_ranges() {
    if !git::is_available() {
        eprintln!("git unavailable, skipping");
        return;
    }

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    init_repo(dir);

    write_numbered(dir, "App.java", 30);
    write_numbered(dir, "Gone.java", 10);
    commit_all(dir, "initial");
    let base = run_git(dir, &["rev-parse", "HEAD"]);

    fs::remove_file(dir.join("Gone.java")).expect("remove");
    change_lines(dir, "App.java", 30, (3, 4));
    commit_all(dir, "delete one, change another");

    let request = DiffRequest {
        base: Some(base),
        target: None,
        mode: DiffMode::CommittedOnly,
    };
    let ranges = changed_lines(dir, &request).expect("coverage data");

    assert!(ranges.covers("App.java", 3));
    assert!(ranges.ranges("Gone.java").is_none());
}

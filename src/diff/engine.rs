// src/diff/engine.rs
//! Resolves refs and computes the changed-line ranges for the current
//! change.
//!
//! The engine never fails its caller: any git-layer problem (no repository,
//! unresolvable ref, subprocess error) degrades to "no coverage data",
//! which the filter treats as "pass everything through". Diff coverage is
//! a refinement, not a source of false negatives.

use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use super::git;
use super::ranges::{ChangedLineRanges, LineRange};

/// Which changes contribute ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Only committed changes between base and target (tree..tree).
    CommittedOnly,
    /// Only uncommitted local changes (HEAD..working-tree).
    WorkingTreeOnly,
    /// Union of committed and uncommitted changes.
    #[default]
    CommittedPlusWorkingTree,
}

impl DiffMode {
    const fn includes_committed(self) -> bool {
        matches!(
            self,
            DiffMode::CommittedOnly | DiffMode::CommittedPlusWorkingTree
        )
    }

    const fn includes_working_tree(self) -> bool {
        matches!(
            self,
            DiffMode::WorkingTreeOnly | DiffMode::CommittedPlusWorkingTree
        )
    }
}

impl FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "committed" | "committedonly" => Ok(DiffMode::CommittedOnly),
            "workingtree" | "workingtreeonly" => Ok(DiffMode::WorkingTreeOnly),
            "both" | "committedplusworkingtree" => Ok(DiffMode::CommittedPlusWorkingTree),
            other => Err(format!("unknown diff mode '{other}'")),
        }
    }
}

/// What to diff. Without an explicit base the engine derives one from the
/// current branch's upstream tracking ref.
#[derive(Debug, Clone, Default)]
pub struct DiffRequest {
    pub base: Option<String>,
    pub target: Option<String>,
    pub mode: DiffMode,
}

/// Computes the changed-line ranges for the repository at `repo_root`.
///
/// Returns `None` to signal "no coverage data" on any git-layer failure;
/// the caller must then pass all violations through unfiltered.
#[must_use]
pub fn changed_lines(repo_root: &Path, request: &DiffRequest) -> Option<ChangedLineRanges> {
    match collect(repo_root, request) {
        Ok(ranges) => {
            info!(
                files = ranges.file_count(),
                "diff coverage computed from git"
            );
            Some(ranges)
        }
        Err(e) => {
            warn!("unable to compute diff coverage: {e:#}. All violations will be reported.");
            None
        }
    }
}

fn collect(repo_root: &Path, request: &DiffRequest) -> anyhow::Result<ChangedLineRanges> {
    if !git::in_repo(repo_root) {
        anyhow::bail!("not inside a git repository: {}", repo_root.display());
    }

    let mut ranges = ChangedLineRanges::default();

    if request.mode.includes_committed() {
        let (base, target) = resolve_refs(repo_root, request)?;
        debug!(%base, %target, "scanning committed diff");
        let patch = git::diff_unified0(repo_root, &base, Some(&target))?;
        scan_patch(&patch, &mut ranges);
    }

    if request.mode.includes_working_tree() {
        // HEAD must exist for a working-tree diff to mean anything.
        git::rev_parse(repo_root, "HEAD")?;
        debug!("scanning working-tree diff");
        let patch = git::diff_unified0(repo_root, "HEAD", None)?;
        scan_patch(&patch, &mut ranges);
    }

    ranges.normalize();

    Ok(ranges)
}

/// Resolution policy: an explicit base wins; otherwise the base is the
/// merge base of HEAD and the upstream tracking ref (falling back to the
/// upstream tip), so commits the branch has not yet integrated are not
/// flagged. No upstream configured means no coverage data; a default
/// branch name is never guessed.
fn resolve_refs(repo_root: &Path, request: &DiffRequest) -> anyhow::Result<(String, String)> {
    let target = match &request.target {
        Some(target) => git::rev_parse(repo_root, target)?,
        None => git::rev_parse(repo_root, "HEAD")?,
    };

    if let Some(base) = &request.base {
        return Ok((git::rev_parse(repo_root, base)?, target));
    }

    let upstream = git::upstream_ref(repo_root)?;

    let base = match git::merge_base(repo_root, "HEAD", &upstream) {
        Ok(base) => base,
        Err(e) => {
            debug!("merge base unavailable ({e:#}), using upstream tip");
            git::rev_parse(repo_root, &upstream)?
        }
    };

    Ok((base, target))
}

/// New-side hunk header: `@@ -a,b +start,count @@` with count defaulting
/// to 1 when omitted.
static HUNK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -\d+(?:,\d+)? \+(?P<start>\d+)(?:,(?P<count>\d+))? @@")
        .expect("valid hunk pattern")
});

/// Walks a unified-0 patch and records each edited span on the new side of
/// the diff. Pure deletions (count 0) contribute nothing, and `/dev/null`
/// new-sides (deleted files) are skipped entirely.
fn scan_patch(patch: &str, ranges: &mut ChangedLineRanges) {
    let mut current_file: Option<String> = None;

    for line in patch.lines() {
        if let Some(path) = line.strip_prefix("+++ ") {
            current_file = match path.strip_prefix("b/") {
                Some(new_path) => Some(new_path.to_string()),
                None => None, // "+++ /dev/null"
            };
            continue;
        }

        let Some(caps) = HUNK_PATTERN.captures(line) else {
            continue;
        };

        let Some(file) = &current_file else {
            continue;
        };

        let start: u32 = caps["start"].parse().unwrap_or(0);
        let count: u32 = caps
            .name("count")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);

        if start == 0 || count == 0 {
            continue;
        }

        ranges.add(file, LineRange::new(start, start + count - 1));
    }
}

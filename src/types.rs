// src/types.rs
//! Common data structures shared by the parsers, the diff engine and the gate.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity of a single violation, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    /// Position in the severity order. Comparisons go through this table
    /// rather than declaration order so reordering variants cannot silently
    /// change gate behavior.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Minor => 1,
            Severity::Major => 2,
            Severity::Critical => 3,
            Severity::Blocker => 4,
        }
    }

    /// Returns true if this severity meets or exceeds the threshold.
    #[must_use]
    pub const fn is_at_least(self, threshold: Severity) -> bool {
        self.rank() >= threshold.rank()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            "blocker" => Ok(Severity::Blocker),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Identity of an analyzer whose log output we understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnalyzerKind {
    ErrorProne,
    CheckerFramework,
    Checkstyle,
}

impl AnalyzerKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AnalyzerKind::ErrorProne => "ErrorProne",
            AnalyzerKind::CheckerFramework => "CheckerFramework",
            AnalyzerKind::Checkstyle => "Checkstyle",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "errorprone" => Ok(AnalyzerKind::ErrorProne),
            "checkerframework" => Ok(AnalyzerKind::CheckerFramework),
            "checkstyle" => Ok(AnalyzerKind::Checkstyle),
            other => Err(format!("unknown analyzer '{other}'")),
        }
    }
}

/// A single defect reported by an analyzer at a file/line/column.
/// Built once by a log parser, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub tool: AnalyzerKind,
    pub description: String,
    /// Lowercase hex SHA-256 over the violation's identifying content.
    pub fingerprint: String,
    pub severity: Severity,
    /// Repository-root-relative, `/`-normalized.
    pub relative_path: String,
    pub full_path: String,
    /// A violation without a line number can never match diff coverage.
    pub line: Option<u32>,
    pub column: u32,
    pub rule: String,
}

/// Outcome of one analyzer execution for one module.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub tool: AnalyzerKind,
    /// Permissive steps report violations but never fail the gate.
    /// Derived from configuration at execution time, fixed afterward.
    pub permissive: bool,
    pub violations: Vec<Violation>,
}

impl StepResult {
    #[must_use]
    pub fn new(tool: AnalyzerKind, permissive: bool, violations: Vec<Violation>) -> Self {
        Self {
            tool,
            permissive,
            violations,
        }
    }

    #[must_use]
    pub fn is_non_permissive(&self) -> bool {
        !self.permissive
    }

    /// Number of violations at or above the given severity.
    #[must_use]
    pub fn count_at_least(&self, threshold: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity.is_at_least(threshold))
            .count()
    }
}

/// Aggregated step results for a single module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleResults {
    pub module: String,
    pub results: Vec<StepResult>,
}

impl ModuleResults {
    #[must_use]
    pub fn new(module: impl Into<String>, results: Vec<StepResult>) -> Self {
        Self {
            module: module.into(),
            results,
        }
    }

    /// All violations across the module's steps, in step order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.results.iter().flat_map(|r| r.violations.iter())
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.results.iter().map(|r| r.violations.len()).sum()
    }
}

/// Results collected from every module in the build, in build order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildResults {
    pub modules: Vec<ModuleResults>,
}

impl BuildResults {
    #[must_use]
    pub fn new(modules: Vec<ModuleResults>) -> Self {
        Self { modules }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.modules.iter().map(ModuleResults::violation_count).sum()
    }

    /// Violations at or above `threshold` with the requested permissiveness,
    /// sorted by severity ascending for stable reporting.
    #[must_use]
    pub fn violations(&self, threshold: Severity, permissive: bool) -> Vec<Violation> {
        let mut selected: Vec<Violation> = self
            .modules
            .iter()
            .flat_map(|m| m.results.iter())
            .filter(|step| step.permissive == permissive)
            .flat_map(|step| step.violations.iter())
            .filter(|v| v.severity.is_at_least(threshold))
            .cloned()
            .collect();

        selected.sort_by_key(|v| v.severity.rank());

        selected
    }
}

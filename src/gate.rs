// src/gate.rs
//! The pass/fail decision.
//!
//! Evaluated exactly once per build, after the last module: flatten the
//! aggregate, apply diff coverage, partition by permissiveness, and fail
//! when any non-permissive violation at or above the threshold remains.

use serde::Serialize;
use tracing::info;

use crate::diff::ranges::ChangedLineRanges;
use crate::filter;
use crate::types::{BuildResults, Severity, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateStatus {
    Pass,
    Fail,
}

/// The gate's outcome: both classified violation lists (severity ascending)
/// plus the threshold that produced them. The host translates `Fail` into
/// a build abort.
#[derive(Debug, Clone, Serialize)]
pub struct GateVerdict {
    pub status: GateStatus,
    pub min_severity: Severity,
    pub permissive: Vec<Violation>,
    pub non_permissive: Vec<Violation>,
}

impl GateVerdict {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }

    /// Human-readable count summary for the host's failure mechanism.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} non-permissive and {} permissive violation(s) at or above {}",
            self.non_permissive.len(),
            self.permissive.len(),
            self.min_severity
        )
    }
}

pub struct QualityGate {
    min_severity: Severity,
}

impl QualityGate {
    #[must_use]
    pub fn new(min_severity: Severity) -> Self {
        Self { min_severity }
    }

    /// Applies diff coverage once over the whole aggregate, then classifies
    /// and decides. `ranges = None` means no coverage data was available
    /// and every violation is considered.
    #[must_use]
    pub fn evaluate(
        &self,
        results: &BuildResults,
        ranges: Option<&ChangedLineRanges>,
    ) -> GateVerdict {
        let total = results.total();
        let filtered = filter::filter_results(results, ranges);

        if ranges.is_some() {
            info!(
                before = total,
                after = filtered.total(),
                "diff coverage applied"
            );
        }

        let permissive = filtered.violations(self.min_severity, true);
        let non_permissive = filtered.violations(self.min_severity, false);

        let status = if non_permissive.is_empty() {
            GateStatus::Pass
        } else {
            GateStatus::Fail
        };

        GateVerdict {
            status,
            min_severity: self.min_severity,
            permissive,
            non_permissive,
        }
    }
}

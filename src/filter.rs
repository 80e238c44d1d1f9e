// src/filter.rs
//! Diff coverage filtering.
//!
//! A violation survives iff it carries both a path and a line number and
//! that line falls inside a changed range for its file. When the engine
//! reported no coverage data the filter is the identity function and all
//! violations pass (fail-open).

use crate::diff::ranges::ChangedLineRanges;
use crate::types::{BuildResults, ModuleResults, StepResult, Violation};

/// Filters a whole build's results. Steps and modules are retained with
/// empty violation lists so counts stay meaningful for reporting.
#[must_use]
pub fn filter_results(results: &BuildResults, ranges: Option<&ChangedLineRanges>) -> BuildResults {
    let Some(ranges) = ranges else {
        return results.clone();
    };

    let modules = results
        .modules
        .iter()
        .map(|module| filter_module(module, ranges))
        .collect();

    BuildResults::new(modules)
}

/// Filters a flat violation list against the ranges.
#[must_use]
pub fn filter_violations(
    violations: Vec<Violation>,
    ranges: Option<&ChangedLineRanges>,
) -> Vec<Violation> {
    let Some(ranges) = ranges else {
        return violations;
    };

    violations
        .into_iter()
        .filter(|v| is_covered(v, ranges))
        .collect()
}

fn filter_module(module: &ModuleResults, ranges: &ChangedLineRanges) -> ModuleResults {
    let results = module
        .results
        .iter()
        .map(|step| {
            let violations = step
                .violations
                .iter()
                .filter(|v| is_covered(v, ranges))
                .cloned()
                .collect();

            StepResult::new(step.tool, step.permissive, violations)
        })
        .collect();

    ModuleResults::new(module.module.clone(), results)
}

fn is_covered(violation: &Violation, ranges: &ChangedLineRanges) -> bool {
    let Some(line) = violation.line else {
        return false;
    };

    if violation.relative_path.is_empty() {
        return false;
    }

    ranges.covers(&violation.relative_path, line)
}

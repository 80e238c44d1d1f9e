// src/diff/ranges.rs
//! Changed-line ranges per file, as produced by the diff engine.

use serde::Serialize;
use std::collections::BTreeMap;

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn contains(self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

/// Mapping from normalized relative file path to its changed line ranges.
///
/// After `normalize`, ranges per file are sorted ascending, non-overlapping
/// and non-adjacent (gap >= 2). A file absent from the map has no changed
/// lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangedLineRanges {
    files: BTreeMap<String, Vec<LineRange>>,
}

impl ChangedLineRanges {
    pub fn add(&mut self, path: &str, range: LineRange) {
        self.files.entry(path.to_string()).or_default().push(range);
    }

    /// Sorts and merges the ranges of every file. Two ranges merge when the
    /// next one starts at or before the previous end + 1 (overlapping or
    /// immediately adjacent), yielding the minimal sorted set.
    pub fn normalize(&mut self) {
        for ranges in self.files.values_mut() {
            ranges.sort_by_key(|r| r.start);

            let mut merged: Vec<LineRange> = Vec::with_capacity(ranges.len());
            for range in ranges.drain(..) {
                match merged.last_mut() {
                    Some(last) if range.start <= last.end + 1 => {
                        last.end = last.end.max(range.end);
                    }
                    _ => merged.push(range),
                }
            }

            *ranges = merged;
        }
    }

    /// Returns true if `line` of `path` falls inside a changed range.
    #[must_use]
    pub fn covers(&self, path: &str, line: u32) -> bool {
        self.files
            .get(path)
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(line)))
    }

    #[must_use]
    pub fn ranges(&self, path: &str) -> Option<&[LineRange]> {
        self.files.get(path).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

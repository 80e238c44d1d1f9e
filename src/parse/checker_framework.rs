// src/parse/checker_framework.rs
//! Checker Framework console log extraction. One violation per line:
//! `path:[line,column] ... [rule] description`.

use regex::{Captures, Regex};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

use super::cursor::LineCursor;
use super::LogParser;
use crate::error::{GateError, Result};
use crate::fingerprint;
use crate::types::{AnalyzerKind, Severity, Violation};

static PART_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*):(\[\d+,\d+\]).*(\[.*\])").expect("valid part pattern"));

static VIOLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<path>.*):\[(?P<line>\d+),(?P<column>\d+)\].*\[(?P<rule>.*)\] (?P<description>.*)$",
    )
    .expect("valid violation pattern")
});

pub struct CheckerFrameworkLogParser {
    repo_root: PathBuf,
}

impl CheckerFrameworkLogParser {
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn violation_of(&self, caps: &Captures<'_>) -> Violation {
        let path = &caps["path"];
        let line: u32 = caps["line"].parse().unwrap_or(0);
        let column: u32 = caps["column"].parse().unwrap_or(0);
        let description = &caps["description"];
        let relative = fingerprint::relative_path(&self.repo_root, path);

        Violation {
            tool: AnalyzerKind::CheckerFramework,
            description: format!("CheckerFramework: {description}"),
            fingerprint: fingerprint::fingerprint(&relative, "WARNING", description, line, column),
            severity: Severity::Minor,
            relative_path: relative,
            full_path: fingerprint::normalize_separators(path),
            line: Some(line),
            column,
            rule: caps["rule"].to_string(),
        }
    }
}

impl LogParser for CheckerFrameworkLogParser {
    fn tool(&self) -> AnalyzerKind {
        AnalyzerKind::CheckerFramework
    }

    fn parse(&self, reader: &mut dyn BufRead) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        let mut cursor = LineCursor::new(reader);

        loop {
            let line = cursor.next_line().map_err(|source| GateError::Parse {
                source,
                tool: self.tool().name(),
            })?;

            let Some(line) = line else {
                break;
            };

            if !PART_PATTERN.is_match(&line) {
                continue;
            }

            match VIOLATION_PATTERN.captures(&line) {
                Some(caps) => violations.push(self.violation_of(&caps)),
                None => debug!(log = %line, "unexpected Checker Framework log line, skipping"),
            }
        }

        Ok(violations)
    }
}

// src/parse/checkstyle.rs
//! Checkstyle console log extraction. One violation per line:
//! `path:[line,column] message [RuleName]`, optionally preceded by a
//! `[ERROR]`/`[WARN]`/`[INFO]` level tag from the console logger.
//!
//! Unlike the other analyzers, checkstyle carries its own severity per
//! violation: ERROR maps to Major, WARN to Minor, anything else to Info.

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
    LazyLock::new(|| Regex::new(r"^(.*):(\[\d+,\d+\]).*(\[.*\])$").expect("valid part pattern"));

static VIOLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\[(?P<level>ERROR|WARN|INFO)\] )?(?P<path>.*):\[(?P<line>\d+),(?P<column>\d+)\] (?P<description>.*) \[(?P<rule>[^\]]*)\]$",
    )
    .expect("valid violation pattern")
});

pub struct CheckstyleLogParser {
    repo_root: PathBuf,
}

impl CheckstyleLogParser {
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
        let level = caps.name("level").map(|m| m.as_str());
        let relative = fingerprint::relative_path(&self.repo_root, path);

        let severity = match level {
            Some("ERROR") => Severity::Major,
            Some("INFO") => Severity::Info,
            _ => Severity::Minor,
        };

        Violation {
            tool: AnalyzerKind::Checkstyle,
            description: format!("Checkstyle: {description}"),
            fingerprint: fingerprint::fingerprint(
                &relative,
                level.unwrap_or("WARNING"),
                description,
                line,
                column,
            ),
            severity,
            relative_path: relative,
            full_path: fingerprint::normalize_separators(path),
            line: Some(line),
            column,
            rule: short_rule_name(&caps["rule"]),
        }
    }
}

/// Checkstyle module names end in "Check"; the short form reads better.
fn short_rule_name(rule: &str) -> String {
    rule.strip_suffix("Check").unwrap_or(rule).to_string()
}

impl LogParser for CheckstyleLogParser {
    fn tool(&self) -> AnalyzerKind {
        AnalyzerKind::Checkstyle
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
                None => debug!(log = %line, "unexpected checkstyle log line, skipping"),
            }
        }

        Ok(violations)
    }
}

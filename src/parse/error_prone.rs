// src/parse/error_prone.rs
//! Error Prone console log extraction.
//!
//! Error Prone spreads one violation over two physical lines (the message,
//! then an indented `(see https://errorprone.info/...)` reference) and
//! sometimes a third `  Did you mean ...` suggestion line. The parser
//! buffers the pair, peeks one line further and pushes it back when it is
//! not a suggestion.

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

/// Fast pre-filter: path, bracketed line/column, bracketed rule token.
static PART_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*):\[(\d+(?:,\d+)?)\] \[(.*?)\]").expect("valid part pattern"));

/// Full extraction pattern, run against the buffered multi-line violation.
static VIOLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<path>.*):\[(?P<line>\d+)(?:,(?P<column>\d+))?\] \[(?P<rule>.*)\] (?P<description>.*\s*\(.*\s*.*)$",
    )
    .expect("valid violation pattern")
});

const SUGGESTION_PREFIX: &str = "  Did you mean";

pub struct ErrorProneLogParser {
    repo_root: PathBuf,
}

impl ErrorProneLogParser {
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn next_or_parse_error(&self, cursor: &mut LineCursor<'_>) -> Result<Option<String>> {
        cursor.next_line().map_err(|source| GateError::Parse {
            source,
            tool: self.tool().name(),
        })
    }

    fn parse_violation(
        &self,
        first: String,
        cursor: &mut LineCursor<'_>,
    ) -> std::io::Result<Option<Violation>> {
        let mut buffer = first;

        if let Some(second) = cursor.next_line()? {
            buffer.push('\n');
            buffer.push_str(&second);
        }

        // Optional third line: typically "  Did you mean ...". Anything else
        // goes back so the outer scan reprocesses it.
        if let Some(peeked) = cursor.next_line()? {
            if peeked.starts_with(SUGGESTION_PREFIX) {
                buffer.push('\n');
                buffer.push_str(&peeked);
            } else {
                cursor.push_back(peeked);
            }
        }

        let Some(caps) = VIOLATION_PATTERN.captures(&buffer) else {
            debug!(log = %buffer, "unexpected Error Prone log fragment, skipping");
            return Ok(None);
        };

        Ok(Some(self.violation_of(&caps)))
    }

    fn violation_of(&self, caps: &Captures<'_>) -> Violation {
        let path = &caps["path"];
        let line: u32 = caps["line"].parse().unwrap_or(0);
        let column: u32 = caps
            .name("column")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let description = &caps["description"];
        let relative = fingerprint::relative_path(&self.repo_root, path);

        Violation {
            tool: AnalyzerKind::ErrorProne,
            description: format!("ErrorProne: {description}"),
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

impl LogParser for ErrorProneLogParser {
    fn tool(&self) -> AnalyzerKind {
        AnalyzerKind::ErrorProne
    }

    fn parse(&self, reader: &mut dyn BufRead) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        let mut cursor = LineCursor::new(reader);

        loop {
            let line = self.next_or_parse_error(&mut cursor)?;

            let Some(line) = line else {
                break;
            };

            if !PART_PATTERN.is_match(&line) {
                continue;
            }

            let parsed = self
                .parse_violation(line, &mut cursor)
                .map_err(|source| GateError::Parse {
                    source,
                    tool: self.tool().name(),
                })?;

            if let Some(violation) = parsed {
                violations.push(violation);
            }
        }

        Ok(violations)
    }
}

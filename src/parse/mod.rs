// src/parse/mod.rs
//! Violation extraction from raw analyzer logs.
//!
//! Each analyzer gets one parser that understands its exact console format
//! and nothing else. Parsers fail only on stream I/O errors; lines that look
//! like a violation but do not survive full extraction are dropped with a
//! debug-level note and scanning continues.

pub mod checker_framework;
pub mod checkstyle;
pub mod cursor;
pub mod error_prone;

pub use checker_framework::CheckerFrameworkLogParser;
pub use checkstyle::CheckstyleLogParser;
pub use error_prone::ErrorProneLogParser;

use crate::error::Result;
use crate::types::{AnalyzerKind, Violation};
use std::io::BufRead;

/// One extraction surface per analyzer log format.
pub trait LogParser {
    /// The analyzer this parser understands.
    fn tool(&self) -> AnalyzerKind;

    /// Parses the raw log stream into violation records.
    ///
    /// # Errors
    /// Returns `GateError::Parse` only when the underlying stream fails;
    /// malformed content never aborts parsing.
    fn parse(&self, reader: &mut dyn BufRead) -> Result<Vec<Violation>>;
}

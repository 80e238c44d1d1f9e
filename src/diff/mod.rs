// src/diff/mod.rs
//! Changed-line computation against the git repository.

pub mod engine;
pub mod git;
pub mod ranges;

pub use engine::{changed_lines, DiffMode, DiffRequest};
pub use ranges::{ChangedLineRanges, LineRange};

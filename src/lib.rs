//! Diff-scoped code-quality gate.
//!
//! Collects violations from the raw logs of several static analyzers,
//! narrows them to the lines touched by the current change (via git), and
//! fails the build when non-permissive violations at or above a severity
//! threshold remain.

pub mod diff;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod gate;
pub mod parse;
pub mod report;
pub mod store;
pub mod types;

// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// A log stream failed mid-parse. Malformed log content is never an
    /// error; only the underlying reader can produce one.
    #[error("Failed to read {tool} log: {source}")]
    Parse {
        source: std::io::Error,
        tool: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, GateError>;

//! Error types for navmesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for navmesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing a navmesh file.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A line could not be interpreted.
    #[error("line {line}: {message}")]
    InvalidContent {
        /// 1-based line number (0 when the error is not tied to a line).
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// The file ended before all declared records were read.
    #[error("unexpected end of file: expected {expected} {section}, got {got}")]
    Truncated {
        /// Which section was being read (`header`, `vertices`, `faces`).
        section: &'static str,
        /// Declared number of records.
        expected: usize,
        /// Number of records actually read.
        got: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error for a given line.
    #[must_use]
    pub fn invalid_content(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            line,
            message: message.into(),
        }
    }
}

//! Error types for the Lumen library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Lumen operations.
///
/// Analysis itself never fails: insufficient or degenerate data is skipped
/// silently. Errors only come from loading datasets and configuration.
#[derive(Debug, Error)]
pub enum LumenError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is not an array of flat records.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Lumen operations.
pub type Result<T> = std::result::Result<T, LumenError>;

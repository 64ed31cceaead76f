//! Error types for export operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing an export.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export target is not a directory
    #[error("Not a directory: {path:?}")]
    NotADirectory {
        /// Path that was expected to be a directory
        path: PathBuf,
    },
}

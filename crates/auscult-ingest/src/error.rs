//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering and reading input sources.
///
/// Only the directory-level variants ever surface to the caller; per-file
/// read and parse failures are salvaged into empty tables by the readers.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory not found or not a directory.
    #[error("input directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table-like file could not be parsed in its declared format.
    #[error("failed to parse {path}: {message}")]
    TableParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

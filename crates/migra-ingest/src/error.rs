//! Error types for client export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, limit is {max_size} bytes")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// The delimited-text reader rejected the input.
    #[error("failed to parse CSV at line {line}: {message}")]
    CsvParse { line: u64, message: String },
}

impl From<::csv::Error> for IngestError {
    fn from(err: ::csv::Error) -> Self {
        Self::CsvParse {
            line: err.position().map(|pos| pos.line()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No template registered under this key.
    UnknownTemplate(String),
    /// Field id not in the catalog.
    UnknownField(String),
    /// Column not found in the source header.
    ColumnNotFound(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTemplate(key) => write!(f, "Unknown template: {key}"),
            Self::UnknownField(id) => write!(f, "Unknown field: {id}"),
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
        }
    }
}

impl std::error::Error for MapError {}

//! Error types for record assembly.

use thiserror::Error;

/// Errors that fail a single row during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Mapping names a transform id that does not exist.
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// Mapping targets a field the record has no slot for.
    #[error("unknown target field: {0}")]
    UnknownField(String),

    /// A required mapping produced an empty value.
    #[error("required field {field} is empty (column {column})")]
    RequiredFieldEmpty { field: String, column: String },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

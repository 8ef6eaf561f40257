//! Client migration data model.
//!
//! Shared types for every stage of the migration pipeline: the
//! [`MigrationConfig`] authored by the caller, the parsed [`Row`], the
//! assembled [`ClientRecord`], and the preview/execution outcomes.

pub mod config;
pub mod error;
pub mod processing;
pub mod record;
pub mod row;

pub use config::{ColumnMapping, ImportType, MigrationConfig, MigrationOptions};
pub use error::{ModelError, Result};
pub use processing::{
    ExecutionError, MigrationPreview, MigrationResult, MigrationStatus, PREVIEW_SAMPLE_SIZE,
    ValidationError, spreadsheet_row,
};
pub use record::ClientRecord;
pub use row::Row;

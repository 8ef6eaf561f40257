//! Outcomes of the preview and execution passes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::ClientRecord;
use crate::row::Row;

/// Number of raw rows carried in a preview sample.
pub const PREVIEW_SAMPLE_SIZE: usize = 5;

/// Spreadsheet line number for a 0-based data row index (header is line 1).
pub fn spreadsheet_row(index: usize) -> usize {
    index + 2
}

/// Preview-time finding. Informational only; never blocks execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

/// Commit-time failure of a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPreview {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub duplicates: usize,
    pub errors: Vec<ValidationError>,
    pub sample: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStatus {
    Success,
    Partial,
    Failed,
}

impl MigrationStatus {
    /// Derive the status from run counts alone.
    ///
    /// A run with no errors is a success even when every row was skipped.
    pub fn from_counts(success_count: usize, error_count: usize) -> Self {
        if error_count == 0 {
            Self::Success
        } else if success_count > 0 {
            Self::Partial
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub id: String,
    pub config_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: MigrationStatus,
    pub total_processed: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<ExecutionError>,
    pub imported_record_ids: Vec<String>,
    /// Accepted records, for the caller to persist.
    #[serde(default)]
    pub imported: Vec<ClientRecord>,
    /// True when the run stopped early on request.
    #[serde(default)]
    pub cancelled: bool,
}

impl MigrationResult {
    /// `total_processed == success + skipped + errors`.
    pub fn totals_consistent(&self) -> bool {
        self.total_processed == self.success_count + self.skipped_count + self.error_count
    }
}

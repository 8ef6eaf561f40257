//! Preview validation engine.

use migra_model::{
    MigrationConfig, MigrationPreview, PREVIEW_SAMPLE_SIZE, Row, ValidationError, spreadsheet_row,
};
use tracing::{debug, info, info_span};

use crate::checks::duplicates::DuplicateIndex;
use crate::checks::{format, required};

/// Runs the required, format and duplicate checks for one config.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a MigrationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a MigrationConfig) -> Self {
        Self { config }
    }

    /// Required/format findings for a single row.
    pub fn check_row(&self, row: &Row, row_number: usize) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for mapping in &self.config.column_mapping {
            let value = row.value(&mapping.source_column);
            if let Some(error) = required::check(mapping, value, row_number)
                .or_else(|| format::check(mapping, value, row_number))
            {
                errors.push(error);
            }
        }
        errors
    }

    pub fn preview(&self, rows: &[Row]) -> MigrationPreview {
        let span = info_span!("preview", config_id = %self.config.id, rows = rows.len());
        let _guard = span.enter();

        let index = DuplicateIndex::build(rows, self.config);
        let mut errors = Vec::new();
        let mut valid_rows = 0;
        let mut duplicates = 0;

        for (idx, row) in rows.iter().enumerate() {
            let row_number = spreadsheet_row(idx);
            let row_errors = self.check_row(row, row_number);
            if row_errors.is_empty() {
                valid_rows += 1;
            } else {
                debug!(row = row_number, issues = row_errors.len(), "row failed validation");
            }
            errors.extend(row_errors);

            let found = index.findings(row, row_number);
            duplicates += found.len();
            errors.extend(found);
        }

        let total_rows = rows.len();
        info!(
            total_rows,
            valid_rows,
            invalid_rows = total_rows - valid_rows,
            duplicates,
            "preview complete"
        );

        MigrationPreview {
            total_rows,
            valid_rows,
            invalid_rows: total_rows - valid_rows,
            duplicates,
            errors,
            sample: rows.iter().take(PREVIEW_SAMPLE_SIZE).cloned().collect(),
        }
    }
}

/// Validate `rows` against `config` without touching any store.
pub fn preview(rows: &[Row], config: &MigrationConfig) -> MigrationPreview {
    Validator::new(config).preview(rows)
}

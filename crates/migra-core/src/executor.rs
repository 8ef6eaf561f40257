//! Sequential migration executor.
//!
//! Rows are processed once, in file order. Each row ends up in exactly one of
//! three buckets: imported, skipped as an existing duplicate, or failed with
//! an [`ExecutionError`]. A failing row never stops the run.

use std::borrow::Borrow;

use chrono::{NaiveDate, Utc};
use migra_model::{
    ClientRecord, ExecutionError, MigrationConfig, MigrationResult, MigrationStatus, Row,
    spreadsheet_row,
};
use migra_transform::RecordBuilder;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::dedup::{ExistingRecords, find_duplicate};
use crate::redact::redact_value;

/// Field name used for row-level execution failures.
pub const GENERAL_FIELD: &str = "general";

type ProgressFn<'a> = Box<dyn Fn(usize) + 'a>;

/// Commits rows against a config and a read-only view of existing records.
pub struct MigrationExecutor<'a, S: ?Sized> {
    config: &'a MigrationConfig,
    store: &'a S,
    builder: RecordBuilder<'a>,
    cancel: CancellationToken,
    on_progress: Option<ProgressFn<'a>>,
}

impl<'a, S> MigrationExecutor<'a, S>
where
    S: ExistingRecords + ?Sized,
{
    pub fn new(config: &'a MigrationConfig, store: &'a S) -> Self {
        Self {
            config,
            store,
            builder: RecordBuilder::new(config),
            cancel: CancellationToken::new(),
            on_progress: None,
        }
    }

    /// Pin the date written into provenance notes.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.builder = self.builder.with_date(date);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Called with the running count after every processed row.
    pub fn on_progress(mut self, callback: impl Fn(usize) + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn execute(&self, rows: &[Row]) -> MigrationResult {
        self.execute_rows(rows)
    }

    /// Execute over any row source, such as a streaming reader.
    pub fn execute_rows<I, R>(&self, rows: I) -> MigrationResult
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Row>,
    {
        let span = info_span!("migration", config_id = %self.config.id);
        let _guard = span.enter();

        let started_at = Utc::now();
        let mut run = RunState::default();

        for (idx, row) in rows.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!(processed = run.total_processed, "migration cancelled");
                run.cancelled = true;
                break;
            }
            self.process_row(row.borrow(), spreadsheet_row(idx), &mut run);
            if let Some(callback) = &self.on_progress {
                callback(run.total_processed);
            }
        }

        let status = MigrationStatus::from_counts(run.success_count, run.error_count);
        info!(
            status = %status,
            total = run.total_processed,
            imported = run.success_count,
            skipped = run.skipped_count,
            failed = run.error_count,
            "migration finished"
        );

        MigrationResult {
            id: Uuid::new_v4().to_string(),
            config_id: self.config.id.clone(),
            started_at,
            completed_at: Utc::now(),
            status,
            total_processed: run.total_processed,
            success_count: run.success_count,
            error_count: run.error_count,
            skipped_count: run.skipped_count,
            errors: run.errors,
            imported_record_ids: run.imported.iter().map(|r| r.id.clone()).collect(),
            imported: run.imported,
            cancelled: run.cancelled,
        }
    }

    fn process_row(&self, row: &Row, row_number: usize, run: &mut RunState) {
        run.total_processed += 1;

        let mut record = match self.builder.build(row) {
            Ok(record) => record,
            Err(err) => {
                let value = row.to_json();
                warn!(row = row_number, error = %err, data = redact_value(&value), "row failed");
                run.errors.push(ExecutionError {
                    row: row_number,
                    field: GENERAL_FIELD.to_string(),
                    value,
                    message: err.to_string(),
                });
                run.error_count += 1;
                return;
            }
        };

        if self.config.options.skip_duplicates {
            if let Some(existing) = find_duplicate(self.store, &record) {
                debug!(row = row_number, existing_id = %existing.id, "duplicate skipped");
                run.skipped_count += 1;
                return;
            }
        }

        self.accept(&mut record);
        run.imported.push(record);
        run.success_count += 1;
    }

    fn accept(&self, record: &mut ClientRecord) {
        record.id = Uuid::new_v4().to_string();
        record.created_at = Some(Utc::now());
        for tag in &self.config.tags {
            record.add_tag(tag);
        }
        let options = &self.config.options;
        if options.create_tags {
            for tag in &options.default_tags {
                record.add_tag(tag);
            }
        }
        record.unit_id = options.unit_id.clone();
    }
}

#[derive(Default)]
struct RunState {
    total_processed: usize,
    success_count: usize,
    error_count: usize,
    skipped_count: usize,
    errors: Vec<ExecutionError>,
    imported: Vec<ClientRecord>,
    cancelled: bool,
}

/// Execute `rows` with default executor settings.
pub fn execute<S>(rows: &[Row], config: &MigrationConfig, store: &S) -> MigrationResult
where
    S: ExistingRecords + ?Sized,
{
    MigrationExecutor::new(config, store).execute(rows)
}

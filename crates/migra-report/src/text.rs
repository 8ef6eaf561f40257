//! Plain-text rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use migra_model::{MigrationPreview, MigrationResult};

const LABEL_WIDTH: usize = 12;

fn field(lines: &mut Vec<String>, label: &str, value: impl std::fmt::Display) {
    lines.push(format!("{:<width$}{value}", format!("{label}:"), width = LABEL_WIDTH));
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("=".repeat(title.chars().count()));
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a run outcome. Same input, same text.
pub fn render_report(result: &MigrationResult) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "MIGRATION REPORT");
    lines.push(String::new());
    field(&mut lines, "Run", &result.id);
    field(&mut lines, "Config", &result.config_id);
    field(&mut lines, "Started", timestamp(&result.started_at));
    field(&mut lines, "Completed", timestamp(&result.completed_at));
    field(&mut lines, "Status", result.status);
    if result.cancelled {
        field(&mut lines, "Cancelled", "yes");
    }
    lines.push(String::new());
    field(&mut lines, "Processed", result.total_processed);
    field(&mut lines, "Imported", result.success_count);
    field(&mut lines, "Skipped", result.skipped_count);
    field(&mut lines, "Errors", result.error_count);
    lines.push(String::new());

    heading(&mut lines, "ERRORS");
    if result.errors.is_empty() {
        lines.push("No errors.".to_string());
    }
    for (idx, error) in result.errors.iter().enumerate() {
        lines.push(format!(
            "{}. Row {} [{}]: {}",
            idx + 1,
            error.row,
            error.field,
            error.message
        ));
    }
    lines.join("\n")
}

/// Render a preview summary.
pub fn render_preview(preview: &MigrationPreview) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "MIGRATION PREVIEW");
    lines.push(String::new());
    field(&mut lines, "Rows", preview.total_rows);
    field(&mut lines, "Valid", preview.valid_rows);
    field(&mut lines, "Invalid", preview.invalid_rows);
    field(&mut lines, "Duplicates", preview.duplicates);
    lines.push(String::new());

    heading(&mut lines, "ISSUES");
    if preview.errors.is_empty() {
        lines.push("No issues.".to_string());
    }
    for (idx, error) in preview.errors.iter().enumerate() {
        lines.push(format!(
            "{}. Row {} [{}] {:?}: {}",
            idx + 1,
            error.row,
            error.field,
            error.value,
            error.message
        ));
    }
    lines.join("\n")
}

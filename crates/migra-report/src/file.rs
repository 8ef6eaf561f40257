//! Report files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use migra_model::MigrationResult;
use tracing::info;

use crate::text::render_report;

pub const REPORT_FILE_PREFIX: &str = "relatorio_migracao_";

/// `relatorio_migracao_<YYYY-MM-DD>.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{REPORT_FILE_PREFIX}{}.txt", date.format("%Y-%m-%d"))
}

/// Write the rendered report into `dir`, named after the run's completion
/// date. Creates `dir` if needed and overwrites a report of the same day.
pub fn write_report(dir: &Path, result: &MigrationResult) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(result.completed_at.date_naive()));
    let mut text = render_report(result);
    text.push('\n');
    fs::write(&path, text)?;
    info!(path = %path.display(), "wrote migration report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use migra_model::MigrationStatus;

    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(report_file_name(date), "relatorio_migracao_2025-01-07.txt");
    }

    #[test]
    fn writes_into_new_directory() {
        let temp = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 7, 9, 0, 0).unwrap();
        let result = MigrationResult {
            id: "run".to_string(),
            config_id: "cfg".to_string(),
            started_at: at,
            completed_at: at,
            status: MigrationStatus::Success,
            total_processed: 0,
            success_count: 0,
            error_count: 0,
            skipped_count: 0,
            errors: vec![],
            imported_record_ids: vec![],
            imported: vec![],
            cancelled: false,
        };

        let path = write_report(&temp.path().join("reports"), &result).unwrap();
        assert!(path.ends_with("relatorio_migracao_2025-01-07.txt"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("MIGRATION REPORT\n"));
        assert!(text.ends_with("No errors.\n"));
    }
}

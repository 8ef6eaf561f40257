use std::path::PathBuf;

use migra_model::{MigrationPreview, MigrationResult};

#[derive(Debug)]
pub struct PreviewOutcome {
    pub config_name: String,
    pub source_system: String,
    pub preview: MigrationPreview,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub config_name: String,
    pub source_system: String,
    pub result: MigrationResult,
    pub report_path: PathBuf,
    /// Store file and its record count after appending.
    pub stored: Option<(PathBuf, usize)>,
    pub dry_run: bool,
}

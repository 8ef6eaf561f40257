//! Migration report generation.
//!
//! - **text**: deterministic plain-text rendering of preview and run outcomes
//! - **file**: report file naming and writing

mod file;
mod text;

pub use file::{REPORT_FILE_PREFIX, report_file_name, write_report};
pub use text::{render_preview, render_report};

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "migra",
    version,
    about = "Import client records exported by other practice-management systems",
    long_about = "Import client records from CSV exports of other practice-management systems.\n\n\
                  Validate a file with `preview`, then import it with `run`. Column layouts\n\
                  come from a config file, a named template, or are detected from the header."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include client values (CPF, email, phone) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the importable client fields.
    Fields,

    /// List the built-in mapping templates.
    Templates,

    /// Validate a CSV export without importing anything.
    Preview(PreviewArgs),

    /// Import a CSV export and write the migration report.
    Run(RunArgs),
}

/// Input file and column layout, shared by `preview` and `run`.
#[derive(Args)]
pub struct SourceArgs {
    /// CSV export to read.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Migration config file (.json or .toml).
    #[arg(long = "config", value_name = "FILE", conflicts_with = "template")]
    pub config: Option<PathBuf>,

    /// Built-in template key (see `migra templates`).
    #[arg(long = "template", value_name = "KEY")]
    pub template: Option<String>,

    /// Field delimiter of the CSV file.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of issues to list (all when omitted).
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Print the plain-text preview instead of tables.
    #[arg(long = "plain")]
    pub plain: bool,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON file of existing client records; imported records are appended.
    #[arg(long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Directory for the migration report (default: current directory).
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Execute and report without writing to the store.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Import rows even when they match an existing record.
    #[arg(long = "no-skip-duplicates")]
    pub no_skip_duplicates: bool,

    /// Extra tag added to every imported record (repeatable).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use migra_cli::loader::{
    append_to_store, config_from_template, detect_config, load_config, load_store,
};
use migra_core::MigrationExecutor;
use migra_ingest::{CsvTable, IngestOptions, read_csv_file};
use migra_map::{all_fields, templates, unmapped_columns};
use migra_model::MigrationConfig;
use migra_report::write_report;
use migra_validate::Validator;

use crate::cli::{PreviewArgs, RunArgs, SourceArgs};
use crate::summary::apply_table_style;
use crate::types::{PreviewOutcome, RunOutcome};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} rows {msg}";

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Label", "Group", "Kind", "Required"]);
    apply_table_style(&mut table);
    for field in all_fields() {
        table.add_row(vec![
            field.id,
            field.label,
            field.namespace.as_str(),
            field.kind.as_str(),
            if field.required { "yes" } else { "" },
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_templates() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Source system", "Columns", "Description"]);
    apply_table_style(&mut table);
    for template in templates() {
        table.add_row(vec![
            template.key.to_string(),
            template.source_system.to_string(),
            template.len().to_string(),
            template.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewOutcome> {
    let (table, config) = load_source(&args.source)?;
    let span = info_span!("preview", file = %args.source.csv.display());
    let _guard = span.enter();

    let preview = Validator::new(&config).preview(&table.rows);
    Ok(PreviewOutcome {
        config_name: config.name.clone(),
        source_system: config.source_label().to_string(),
        preview,
    })
}

pub fn run_migration(args: &RunArgs) -> Result<RunOutcome> {
    let (table, mut config) = load_source(&args.source)?;
    let span = info_span!("run", file = %args.source.csv.display(), dry_run = args.dry_run);
    let _guard = span.enter();

    if args.no_skip_duplicates {
        config.options.skip_duplicates = false;
    }
    for tag in &args.tags {
        config.add_tag(tag.as_str());
    }

    let store = match &args.store {
        Some(path) => load_store(path)?,
        None => migra_core::InMemoryStore::new(),
    };
    info!(existing = store.len(), rows = table.rows.len(), "starting migration");

    let progress = progress_bar(table.rows.len(), args.no_progress)?;
    let result = MigrationExecutor::new(&config, &store)
        .on_progress(|processed| progress.set_position(processed as u64))
        .execute(&table.rows);
    progress.finish_and_clear();

    let report_dir = args.report_dir.as_deref().unwrap_or(Path::new("."));
    let report_path = write_report(report_dir, &result)
        .with_context(|| format!("write report to {}", report_dir.display()))?;

    let stored = match (&args.store, args.dry_run) {
        (Some(path), false) => {
            let total = append_to_store(path, &result.imported)?;
            info!(path = %path.display(), total, "updated record store");
            Some((path.clone(), total))
        }
        _ => None,
    };

    Ok(RunOutcome {
        config_name: config.name.clone(),
        source_system: config.source_label().to_string(),
        result,
        report_path,
        stored,
        dry_run: args.dry_run,
    })
}

/// Read the CSV and resolve the config it is imported with.
fn load_source(source: &SourceArgs) -> Result<(CsvTable, MigrationConfig)> {
    let options = ingest_options(source.delimiter)?;
    let table = read_csv_file(&source.csv, options)
        .with_context(|| format!("read {}", source.csv.display()))?;
    let config = resolve_config(source, &table.headers)?;

    let unmapped = unmapped_columns(&config, &table.headers);
    if !unmapped.is_empty() {
        warn!(columns = ?unmapped, "columns without a mapping are ignored");
    }
    Ok((table, config))
}

fn resolve_config(source: &SourceArgs, headers: &[String]) -> Result<MigrationConfig> {
    match (&source.config, &source.template) {
        (Some(path), _) => load_config(path),
        (None, Some(key)) => config_from_template(key),
        (None, None) => detect_config(headers),
    }
}

fn ingest_options(delimiter: char) -> Result<IngestOptions> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(IngestOptions::default().with_delimiter(delimiter as u8))
}

fn progress_bar(len: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden || !io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

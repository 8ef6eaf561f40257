use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use migra_model::MigrationStatus;
use migra_report::render_preview;

use crate::types::{PreviewOutcome, RunOutcome};

pub fn print_preview(outcome: &PreviewOutcome, limit: Option<usize>, plain: bool) {
    let preview = &outcome.preview;
    if plain {
        println!("{}", render_preview(preview));
        return;
    }
    println!("Config: {} ({})", outcome.config_name, outcome.source_system);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Duplicates"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(preview.total_rows).add_attribute(Attribute::Bold),
        count_cell(preview.valid_rows, Color::Green),
        count_cell(preview.invalid_rows, Color::Red),
        count_cell(preview.duplicates, Color::Yellow),
    ]);
    println!("{table}");

    if preview.errors.is_empty() {
        return;
    }
    let mut issues = Table::new();
    issues.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut issues);
    align_column(&mut issues, 0, CellAlignment::Right);
    let shown = limit.unwrap_or(preview.errors.len());
    for error in preview.errors.iter().take(shown) {
        issues.add_row(vec![
            Cell::new(error.row),
            Cell::new(&error.field).fg(Color::Blue),
            value_cell(&error.value),
            Cell::new(&error.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{issues}");
    if shown < preview.errors.len() {
        println!("... and {} more", preview.errors.len() - shown);
    }
}

pub fn print_run(outcome: &RunOutcome) {
    let result = &outcome.result;
    println!("Config: {} ({})", outcome.config_name, outcome.source_system);
    println!("Report: {}", outcome.report_path.display());
    match &outcome.stored {
        Some((path, total)) => println!("Store: {} ({total} records)", path.display()),
        None if outcome.dry_run => println!("Store: unchanged (dry run)"),
        None => {}
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Processed"),
        header_cell("Imported"),
        header_cell("Skipped"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        status_cell(result.status, result.cancelled),
        Cell::new(result.total_processed).add_attribute(Attribute::Bold),
        count_cell(result.success_count, Color::Green),
        count_cell(result.skipped_count, Color::Yellow),
        count_cell(result.error_count, Color::Red),
    ]);
    println!("{table}");

    if result.errors.is_empty() {
        return;
    }
    let mut errors = Table::new();
    errors.set_header(vec![header_cell("Row"), header_cell("Message")]);
    apply_issue_table_style(&mut errors);
    align_column(&mut errors, 0, CellAlignment::Right);
    for error in &result.errors {
        errors.add_row(vec![Cell::new(error.row), Cell::new(&error.message)]);
    }
    println!();
    println!("Errors:");
    println!("{errors}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: MigrationStatus, cancelled: bool) -> Cell {
    let label = if cancelled {
        format!("{status} (cancelled)")
    } else {
        status.to_string()
    };
    let color = match status {
        MigrationStatus::Success => Color::Green,
        MigrationStatus::Partial => Color::Yellow,
        MigrationStatus::Failed => Color::Red,
    };
    Cell::new(label).fg(color).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

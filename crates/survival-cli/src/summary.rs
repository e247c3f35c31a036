use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survival_model::{COLUMN_ROLES, ColumnRole, CurvePoint, format_parameter};

use crate::report::{AnalysisReport, WeibullSection};

/// Render the report as terminal tables.
pub fn render_tables(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source: {}\n", report.source.display()));
    out.push_str(&format!("SHA-256: {}\n", report.source_sha256));
    out.push_str(&format!(
        "Records: {} ({} failed, {} censored)\n\n",
        report.summary.records, report.summary.failures, report.summary.censored
    ));

    out.push_str("Weibull parameters:\n");
    out.push_str(&parameter_table(&report.weibull).to_string());
    out.push_str("\n\nKaplan-Meier:\n");
    out.push_str(&curve_table(&report.kaplan_meier).to_string());
    out.push_str("\n\nWeibull:\n");
    out.push_str(&curve_table(report.weibull.curve()).to_string());
    out.push('\n');
    out
}

/// Render the positional column convention.
pub fn render_schema() -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Position"),
        header_cell("Meaning"),
    ]);
    apply_table_style(&mut table);
    for role in COLUMN_ROLES {
        let meaning = match role {
            ColumnRole::Status => "failure marker (default F); any other code is censored",
            ColumnRole::Time => "positive time to failure or censoring",
            ColumnRole::Quantity => "positive count used as the Kaplan-Meier denominator",
        };
        table.add_row(vec![
            Cell::new(role.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(role.position_label()),
            Cell::new(meaning),
        ]);
    }
    table.to_string()
}

fn parameter_table(section: &WeibullSection) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let (k, lambda) = section.parameter_labels();
    match section {
        WeibullSection::Fitted { r_squared, .. } => {
            table.add_row(vec![Cell::new("k (shape)"), Cell::new(k)]);
            table.add_row(vec![Cell::new("λ (scale)"), Cell::new(lambda)]);
            table.add_row(vec![dim_cell("R²"), dim_cell(format_parameter(*r_squared))]);
        }
        WeibullSection::InsufficientData { message } => {
            table.add_row(vec![Cell::new("k (shape)"), warn_cell(k)]);
            table.add_row(vec![Cell::new("λ (scale)"), warn_cell(lambda)]);
            table.add_row(vec![dim_cell("reason"), dim_cell(message)]);
        }
    }
    table
}

fn curve_table(points: &[CurvePoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Time"), header_cell("Survival")]);
    apply_curve_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    if points.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("-")]);
    }
    for point in points {
        table.add_row(vec![
            Cell::new(point.time),
            survival_cell(point.survival),
        ]);
    }
    table
}

fn survival_cell(value: f64) -> Cell {
    let cell = Cell::new(format_parameter(value));
    if value < 0.0 {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_curve_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn warn_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::Yellow)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

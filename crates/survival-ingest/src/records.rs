//! Positional mapping from table rows to validated survival records.

use std::path::Path;

use tracing::{debug, info_span};

use survival_model::{ColumnLayout, Dataset, Status, SurvivalRecord};

use crate::csv_table::{CsvTable, IngestOptions, read_csv_table};
use crate::error::{IngestError, Result};

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64> {
    let value = raw.trim();
    value.parse::<f64>().map_err(|_| IngestError::InvalidNumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Map every data row of `table` into a record.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn records_from_table(table: &CsvTable, options: &IngestOptions) -> Result<Dataset> {
    if table.rows.is_empty() {
        return Err(IngestError::NoData);
    }
    let layout = ColumnLayout::from_headers(&table.headers).ok_or(IngestError::TooFewColumns {
        found: table.headers.len(),
    })?;
    debug!(
        status = %layout.status_name,
        time = %layout.time_name,
        quantity = %layout.quantity_name,
        "resolved column layout"
    );

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let row_number = idx + 1;
        let status = Status::from_code(cell(row, layout.status), &options.failure_marker);
        let time = parse_number(cell(row, layout.time), row_number, &layout.time_name)?;
        let quantity = parse_number(cell(row, layout.quantity), row_number, &layout.quantity_name)?;
        let record = SurvivalRecord::new(time, status, quantity).map_err(|source| {
            IngestError::Record {
                row: row_number,
                source,
            }
        })?;
        records.push(record);
    }
    Dataset::new(records).map_err(|_| IngestError::NoData)
}

/// Read `path` and map it into a dataset.
pub fn load_dataset(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let table = read_csv_table(path, options)?;
    let dataset = records_from_table(&table, options)?;
    let summary = dataset.summary();
    debug!(
        records = summary.records,
        failures = summary.failures,
        censored = summary.censored,
        "loaded dataset"
    );
    Ok(dataset)
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use survival_model::DEFAULT_FAILURE_MARKER;

use crate::error::{IngestError, Result};

/// Field delimiter used by exported failure logs.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Options controlling how a source file is tokenized and interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Status code that marks a failure; every other code is censored.
    pub failure_marker: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            failure_marker: DEFAULT_FAILURE_MARKER.to_string(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_failure_marker(mut self, marker: impl Into<String>) -> Self {
        self.failure_marker = marker.into();
        self
    }
}

/// Header row plus data rows, every row padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Data cells keep their surrounding whitespace; only a BOM is removed.
fn normalize_cell(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Read a delimited file. The first non-blank row is the header.
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let table = read_csv_table_from_reader(file, options)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read delimited table"
    );
    Ok(table)
}

/// Read delimited data from any reader.
pub fn read_csv_table_from_reader<R: Read>(reader: R, options: &IngestOptions) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if is_blank_row(&row) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows = raw_rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect();
    Ok(CsvTable { headers, rows })
}

//! Ingestion adapter: delimited text in, validated [`survival_model::Dataset`] out.

pub mod csv_table;
pub mod error;
pub mod records;

pub use csv_table::{
    CsvTable, DEFAULT_DELIMITER, IngestOptions, read_csv_table, read_csv_table_from_reader,
};
pub use error::{IngestError, Result};
pub use records::{load_dataset, records_from_table};

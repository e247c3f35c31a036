use std::path::PathBuf;

use survival_model::{MIN_COLUMNS, SurvivalError};

/// Errors raised while turning a source file into a dataset.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// The source has a header but no data rows.
    #[error("source contains no data rows")]
    NoData,

    #[error("expected at least {} columns, found {found}", MIN_COLUMNS)]
    TooFewColumns { found: usize },

    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: SurvivalError,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the source had no data rows.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

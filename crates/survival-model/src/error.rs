use thiserror::Error;

/// Error kinds raised by the record model and the estimators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurvivalError {
    /// The source contained no data rows.
    #[error("no data rows to analyze")]
    NoData,

    /// The Weibull regression cannot be fitted to the failures.
    #[error("insufficient data for Weibull fit: {reason}")]
    InsufficientData { reason: String },

    /// A record field violates the positive-and-finite invariant.
    #[error("invalid {field}: {value} (must be positive and finite)")]
    InvalidRecord { field: &'static str, value: f64 },
}

impl SurvivalError {
    /// Create an InsufficientData error.
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// Returns true for the `InsufficientData` kind.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, SurvivalError>;

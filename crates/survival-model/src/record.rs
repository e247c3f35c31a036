//! Survival records and their event status.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, SurvivalError};

/// Status code that marks a failure when no other marker is configured.
pub const DEFAULT_FAILURE_MARKER: &str = "F";

/// Outcome observed for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The event occurred at the recorded time.
    Failed,
    /// Observation stopped before the event occurred.
    Censored,
}

impl Status {
    /// Derive a status from a raw status code.
    ///
    /// Only an exact match on `failure_marker` yields `Failed`. Every other
    /// code, including empty or unrecognized ones, is `Censored`.
    pub fn from_code(code: &str, failure_marker: &str) -> Self {
        if code == failure_marker {
            Status::Failed
        } else {
            Status::Censored
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Failed => "Failed",
            Status::Censored => "Censored",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One subject's observed time plus status.
///
/// `rank` stays `None` on records built from input. The Weibull estimator
/// fills it on its own ranked copy. Deserialization goes through
/// [`SurvivalRecord::new`], so decoded records are validated too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct SurvivalRecord {
    time: f64,
    status: Status,
    quantity: f64,
    rank: Option<u32>,
}

impl SurvivalRecord {
    /// Build a validated record. `time` and `quantity` must be positive and finite.
    pub fn new(time: f64, status: Status, quantity: f64) -> Result<Self> {
        if !(time.is_finite() && time > 0.0) {
            return Err(SurvivalError::InvalidRecord {
                field: "time",
                value: time,
            });
        }
        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(SurvivalError::InvalidRecord {
                field: "quantity",
                value: quantity,
            });
        }
        Ok(Self {
            time,
            status,
            quantity,
            rank: None,
        })
    }

    /// Shorthand for a `Failed` record.
    pub fn failed(time: f64, quantity: f64) -> Result<Self> {
        Self::new(time, Status::Failed, quantity)
    }

    /// Shorthand for a `Censored` record.
    pub fn censored(time: f64, quantity: f64) -> Result<Self> {
        Self::new(time, Status::Censored, quantity)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn rank(&self) -> Option<u32> {
        self.rank
    }

    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    /// Copy of this record carrying the given rank.
    #[must_use]
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Total order used by both estimators: ascending time, failures before
    /// censored records at the same time, then ascending quantity.
    ///
    /// Records that compare `Equal` are interchangeable, so sorting with this
    /// order makes every result independent of input row order.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| other.is_failed().cmp(&self.is_failed()))
            .then_with(|| self.quantity.total_cmp(&other.quantity))
    }
}

#[derive(Deserialize)]
struct RecordFields {
    time: f64,
    status: Status,
    quantity: f64,
    #[serde(default)]
    rank: Option<u32>,
}

impl TryFrom<RecordFields> for SurvivalRecord {
    type Error = SurvivalError;

    fn try_from(fields: RecordFields) -> Result<Self> {
        let record = Self::new(fields.time, fields.status, fields.quantity)?;
        Ok(Self {
            rank: fields.rank,
            ..record
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_code() {
        assert_eq!(Status::from_code("F", "F"), Status::Failed);
        assert_eq!(Status::from_code("C", "F"), Status::Censored);
        assert_eq!(Status::from_code("f", "F"), Status::Censored);
        assert_eq!(Status::from_code("", "F"), Status::Censored);
        assert_eq!(Status::from_code("FAILED", "FAILED"), Status::Failed);
    }

    #[test]
    fn test_record_validation() {
        assert!(SurvivalRecord::failed(10.0, 5.0).is_ok());
        assert!(matches!(
            SurvivalRecord::failed(0.0, 5.0),
            Err(SurvivalError::InvalidRecord { field: "time", .. })
        ));
        assert!(matches!(
            SurvivalRecord::censored(3.0, -2.0),
            Err(SurvivalError::InvalidRecord {
                field: "quantity",
                ..
            })
        ));
        assert!(SurvivalRecord::failed(f64::NAN, 1.0).is_err());
        assert!(SurvivalRecord::failed(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_with_rank_returns_ranked_copy() {
        let record = SurvivalRecord::failed(4.0, 2.0).unwrap();
        let ranked = record.with_rank(3);
        assert_eq!(record.rank(), None);
        assert_eq!(ranked.rank(), Some(3));
        assert_eq!(ranked.time(), 4.0);
    }

    #[test]
    fn test_total_cmp_orders_ties() {
        let mut records = [
            SurvivalRecord::censored(5.0, 1.0).unwrap(),
            SurvivalRecord::failed(5.0, 9.0).unwrap(),
            SurvivalRecord::failed(2.0, 3.0).unwrap(),
            SurvivalRecord::failed(5.0, 4.0).unwrap(),
        ];
        records.sort_by(SurvivalRecord::total_cmp);
        let keys: Vec<(f64, Status, f64)> = records
            .iter()
            .map(|r| (r.time(), r.status(), r.quantity()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2.0, Status::Failed, 3.0),
                (5.0, Status::Failed, 4.0),
                (5.0, Status::Failed, 9.0),
                (5.0, Status::Censored, 1.0),
            ]
        );
    }
}

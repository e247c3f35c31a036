pub mod curve;
pub mod dataset;
pub mod error;
pub mod record;
pub mod schema;

pub use curve::{CurvePoint, PARAMETER_DECIMALS, WeibullFit, format_parameter};
pub use dataset::{Dataset, DatasetSummary};
pub use error::{Result, SurvivalError};
pub use record::{DEFAULT_FAILURE_MARKER, Status, SurvivalRecord};
pub use schema::{COLUMN_ROLES, ColumnLayout, ColumnRole, MIN_COLUMNS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_summary_counts() {
        let dataset = Dataset::new(vec![
            SurvivalRecord::failed(10.0, 10.0).unwrap(),
            SurvivalRecord::censored(20.0, 10.0).unwrap(),
            SurvivalRecord::failed(30.0, 10.0).unwrap(),
        ])
        .expect("non-empty dataset");
        let summary = dataset.summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.censored, 1);
    }

    #[test]
    fn fit_serializes() {
        let fit = WeibullFit {
            shape: 2.0,
            scale: 50.0,
            r_squared: 0.99,
            curve: vec![CurvePoint::new(10.0, 0.96)],
        };
        let json = serde_json::to_string(&fit).expect("serialize fit");
        let round: WeibullFit = serde_json::from_str(&json).expect("deserialize fit");
        assert_eq!(round, fit);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurvivalError};
use crate::record::SurvivalRecord;

/// Non-empty sequence of records analyzed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetFields")]
pub struct Dataset {
    records: Vec<SurvivalRecord>,
}

impl Dataset {
    /// Wrap records into a dataset. An empty vector is rejected with `NoData`.
    pub fn new(records: Vec<SurvivalRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SurvivalError::NoData);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SurvivalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_records(&self.records)
    }
}

#[derive(Deserialize)]
struct DatasetFields {
    records: Vec<SurvivalRecord>,
}

impl TryFrom<DatasetFields> for Dataset {
    type Error = SurvivalError;

    fn try_from(fields: DatasetFields) -> Result<Self> {
        Self::new(fields.records)
    }
}

impl AsRef<[SurvivalRecord]> for Dataset {
    fn as_ref(&self) -> &[SurvivalRecord] {
        &self.records
    }
}

/// Record counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub failures: usize,
    pub censored: usize,
}

impl DatasetSummary {
    pub fn from_records(records: &[SurvivalRecord]) -> Self {
        let failures = records.iter().filter(|record| record.is_failed()).count();
        Self {
            records: records.len(),
            failures,
            censored: records.len() - failures,
        }
    }
}

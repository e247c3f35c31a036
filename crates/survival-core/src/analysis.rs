//! Both estimators over one dataset.

use tracing::{debug, info_span};

use survival_model::{CurvePoint, Dataset, DatasetSummary, Result, WeibullFit};

use crate::kaplan_meier::kaplan_meier;
use crate::weibull::weibull;

/// Combined result of one analysis run.
///
/// The Kaplan-Meier curve is always present, possibly empty. The Weibull
/// outcome keeps its error so callers can tell "no steps" from "unfittable".
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: DatasetSummary,
    pub kaplan_meier: Vec<CurvePoint>,
    pub weibull: Result<WeibullFit>,
}

impl Analysis {
    pub fn weibull_fit(&self) -> Option<&WeibullFit> {
        self.weibull.as_ref().ok()
    }
}

/// Run the Kaplan-Meier and Weibull estimators over `dataset`.
pub fn analyze(dataset: &Dataset) -> Analysis {
    let summary = dataset.summary();
    let span = info_span!(
        "analysis",
        records = summary.records,
        failures = summary.failures,
        censored = summary.censored
    );
    let _guard = span.enter();

    let kaplan_meier = kaplan_meier(dataset.records());
    let weibull = weibull(dataset.records());
    if let Err(error) = &weibull {
        debug!(%error, "weibull fit unavailable");
    }

    Analysis {
        summary,
        kaplan_meier,
        weibull,
    }
}

//! Serializable analysis report and its text renderings.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::Digest;

use survival_core::Analysis;
use survival_model::{CurvePoint, DatasetSummary, format_parameter};

/// Message shown in place of Weibull parameters when no fit exists.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "insufficient data";

/// Hex-encoded SHA-256 of the source bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

/// Weibull section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeibullSection {
    Fitted {
        k: String,
        lambda: String,
        r_squared: f64,
        curve: Vec<CurvePoint>,
    },
    InsufficientData {
        message: String,
    },
}

impl WeibullSection {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        match &analysis.weibull {
            Ok(fit) => WeibullSection::Fitted {
                k: fit.shape_label(),
                lambda: fit.scale_label(),
                r_squared: fit.r_squared,
                curve: fit.curve.clone(),
            },
            Err(error) => WeibullSection::InsufficientData {
                message: error.to_string(),
            },
        }
    }

    /// Fitted curve, or an empty chart when the fit is unavailable.
    pub fn curve(&self) -> &[CurvePoint] {
        match self {
            WeibullSection::Fitted { curve, .. } => curve,
            WeibullSection::InsufficientData { .. } => &[],
        }
    }

    /// `(k, λ)` labels, falling back to the insufficient-data message.
    pub fn parameter_labels(&self) -> (String, String) {
        match self {
            WeibullSection::Fitted { k, lambda, .. } => (k.clone(), lambda.clone()),
            WeibullSection::InsufficientData { .. } => (
                INSUFFICIENT_DATA_MESSAGE.to_string(),
                INSUFFICIENT_DATA_MESSAGE.to_string(),
            ),
        }
    }
}

/// Everything the presentation layer shows for one analyzed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub source_sha256: String,
    pub generated_at: String,
    pub summary: DatasetSummary,
    pub kaplan_meier: Vec<CurvePoint>,
    pub weibull: WeibullSection,
}

impl AnalysisReport {
    pub fn new(
        source: &Path,
        source_bytes: &[u8],
        analysis: &Analysis,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            source_sha256: sha256_hex(source_bytes),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary: analysis.summary,
            kaplan_meier: analysis.kaplan_meier.clone(),
            weibull: WeibullSection::from_analysis(analysis),
        }
    }
}

/// Pretty-printed JSON rendering.
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Semicolon-separated rendering: one row per curve point, survival with
/// eight fractional digits.
pub fn render_csv(report: &AnalysisReport) -> String {
    let mut out = String::from("curve;time;survival\n");
    push_curve_rows(&mut out, "kaplan_meier", &report.kaplan_meier);
    push_curve_rows(&mut out, "weibull", report.weibull.curve());
    out
}

fn push_curve_rows(out: &mut String, name: &str, points: &[CurvePoint]) {
    for point in points {
        let _ = writeln!(
            out,
            "{name};{};{}",
            point.time,
            format_parameter(point.survival)
        );
    }
}

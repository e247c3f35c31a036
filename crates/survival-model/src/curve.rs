//! Estimator outputs handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Fractional digits used when formatting fitted parameters.
pub const PARAMETER_DECIMALS: usize = 8;

/// One point of a survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time: f64,
    pub survival: f64,
}

impl CurvePoint {
    pub fn new(time: f64, survival: f64) -> Self {
        Self { time, survival }
    }
}

impl From<(f64, f64)> for CurvePoint {
    fn from((time, survival): (f64, f64)) -> Self {
        Self { time, survival }
    }
}

/// Fitted Weibull distribution plus its survival curve over the failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeibullFit {
    /// Shape parameter `k` (regression slope).
    pub shape: f64,
    /// Scale parameter `λ`.
    pub scale: f64,
    /// Coefficient of determination of the linearized regression.
    pub r_squared: f64,
    /// `(time, exp(-(time/λ)^k))` for every failure, ascending by time.
    pub curve: Vec<CurvePoint>,
}

impl WeibullFit {
    /// Shape formatted with [`PARAMETER_DECIMALS`] fractional digits.
    pub fn shape_label(&self) -> String {
        format_parameter(self.shape)
    }

    /// Scale formatted with [`PARAMETER_DECIMALS`] fractional digits.
    pub fn scale_label(&self) -> String {
        format_parameter(self.scale)
    }

    /// Reliability `R(t) = exp(-(t/λ)^k)` at an arbitrary time.
    pub fn survival_at(&self, time: f64) -> f64 {
        (-(time / self.scale).powf(self.shape)).exp()
    }
}

/// Fixed-point rendering with exactly eight digits after the decimal point.
pub fn format_parameter(value: f64) -> String {
    format!("{value:.prec$}", prec = PARAMETER_DECIMALS)
}

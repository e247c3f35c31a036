//! Weibull fit by median-rank regression.
//!
//! The reliability estimate at each failure comes from a rank recursion over
//! the full dataset, then the linearized Weibull survival function
//!
//! ```text
//! ln(-ln(S(t))) = k * ln(t) - k * ln(λ)
//! ```
//!
//! is fitted with ordinary least squares.

use tracing::debug;

use survival_model::{CurvePoint, Result, SurvivalError, SurvivalRecord, WeibullFit};

/// Rank the full dataset by descending time.
///
/// Records are sorted with [`SurvivalRecord::total_cmp`] and the record at
/// ascending index `i` gets rank `n - i`: the longest time is rank 1 and the
/// shortest is rank `n`. At a shared time failures precede censored records,
/// so they take the higher ranks whatever the input order. Returns a ranked
/// copy in ascending order; the input is left untouched.
pub fn rank_records(records: &[SurvivalRecord]) -> Vec<SurvivalRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(SurvivalRecord::total_cmp);
    let n = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.with_rank(rank_for(n, index)))
        .collect()
}

fn rank_for(n: usize, index: usize) -> u32 {
    u32::try_from(n - index).unwrap_or(u32::MAX)
}

/// Reliability estimates for the ranked failures.
///
/// Starting from `y = 1`, each failure in ascending time order applies
/// `y = y * rank / (rank + 1)`. Censored records are skipped and their ranks
/// never enter the product.
pub fn median_rank_reliability(ranked_failures: &[SurvivalRecord]) -> Vec<f64> {
    let mut reliability = 1.0;
    ranked_failures
        .iter()
        .map(|record| {
            let rank = f64::from(record.rank().unwrap_or(0));
            reliability = reliability * rank / (rank + 1.0);
            reliability
        })
        .collect()
}

/// Straight line fitted by ordinary least squares.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineFit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
}

/// Least-squares line through `points`.
///
/// `None` when the slope is undefined: fewer than two distinct `x` values.
fn least_squares(points: &[(f64, f64)]) -> Option<LineFit> {
    let n = points.len() as f64;
    let first_x = points.first()?.0;
    if points.iter().all(|&(x, _)| x == first_x) {
        return None;
    }

    let sum_x: f64 = points.iter().map(|&(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|&(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|&(x, y)| x * y).sum();
    let sum_x2: f64 = points.iter().map(|&(x, _)| x * x).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = points.iter().map(|&(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|&(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(LineFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fit a Weibull distribution to the failures of `records`.
///
/// # Algorithm
/// 1. Rank every record with [`rank_records`] (rank 1 = longest time)
/// 2. Keep failures only, in ascending time with their ranks
/// 3. Reliability `y` per failure via [`median_rank_reliability`]
/// 4. Transform: `x = ln(t)`, `y' = ln(-ln(y))`
/// 5. OLS fit `y' = b + k * x`, then `λ = exp(-b / k)`
/// 6. Curve: `(t, exp(-(t/λ)^k))` for each failure
///
/// # Errors
/// `InsufficientData` when fewer than two distinct failure times exist, a
/// logarithm is undefined, or the fitted parameters are not positive and
/// finite.
///
/// # Examples
///
/// ```
/// use survival_core::weibull;
/// use survival_model::SurvivalRecord;
///
/// let records: Vec<SurvivalRecord> = [10.0, 20.0, 30.0, 40.0, 50.0]
///     .into_iter()
///     .map(|t| SurvivalRecord::failed(t, 1.0).unwrap())
///     .collect();
/// let fit = weibull(&records).unwrap();
/// assert!(fit.shape > 0.0);
/// assert_eq!(fit.curve.len(), 5);
/// assert_eq!(fit.shape_label().split('.').nth(1).unwrap().len(), 8);
/// ```
pub fn weibull(records: &[SurvivalRecord]) -> Result<WeibullFit> {
    let mut failures = rank_records(records);
    failures.retain(SurvivalRecord::is_failed);
    if failures.len() < 2 {
        return Err(SurvivalError::insufficient_data(format!(
            "{} failure(s), at least 2 distinct failure times required",
            failures.len()
        )));
    }

    let reliability = median_rank_reliability(&failures);
    let mut points = Vec::with_capacity(failures.len());
    for (record, &y) in failures.iter().zip(&reliability) {
        let x = record.time().ln();
        let y_transformed = (-y.ln()).ln();
        if !x.is_finite() || !y_transformed.is_finite() {
            return Err(SurvivalError::insufficient_data(format!(
                "undefined logarithm at time {} (reliability {y})",
                record.time()
            )));
        }
        points.push((x, y_transformed));
    }

    let line = least_squares(&points).ok_or_else(|| {
        SurvivalError::insufficient_data("all failures share the same time")
    })?;
    let shape = line.slope;
    let scale = (-line.intercept / line.slope).exp();
    if !(shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0) {
        return Err(SurvivalError::insufficient_data(format!(
            "degenerate fit (k = {shape}, λ = {scale})"
        )));
    }
    debug!(
        failures = failures.len(),
        shape,
        scale,
        r_squared = line.r_squared,
        "weibull regression"
    );

    let curve = failures
        .iter()
        .map(|record| {
            let time = record.time();
            CurvePoint::new(time, (-(time / scale).powf(shape)).exp())
        })
        .collect();

    Ok(WeibullFit {
        shape,
        scale,
        r_squared: line.r_squared,
        curve,
    })
}

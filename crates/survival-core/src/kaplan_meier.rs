//! Kaplan-Meier survival step curve.
//!
//! Censored records take no part in the curve: they neither produce a step
//! nor shrink any denominator. Each step divides by the `quantity` of the
//! first record in its tie group rather than a decrementing risk set. Tied
//! failures are ordered by ascending quantity, so "first" is the smallest
//! quantity in the group regardless of input row order.

use tracing::debug;

use survival_model::{CurvePoint, SurvivalRecord};

/// Failures sharing one observed time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TieGroup {
    time: f64,
    size: usize,
    quantity: f64,
}

/// Estimate the Kaplan-Meier curve.
///
/// Records are sorted by time, censored records are dropped, and consecutive
/// failures with an identical time collapse into one step:
///
/// ```text
/// S = S_prev * (1 - group_size / quantity_of_first_record_in_group)
/// ```
///
/// Returns one point per distinct failure time, ascending. The curve is empty
/// when there are no failures. `S` is not clamped and goes negative when a
/// group is larger than its quantity.
///
/// # Examples
///
/// ```
/// use survival_core::kaplan_meier;
/// use survival_model::SurvivalRecord;
///
/// let records = [SurvivalRecord::failed(12.0, 4.0).unwrap()];
/// let curve = kaplan_meier(&records);
/// assert_eq!(curve.len(), 1);
/// assert!((curve[0].survival - 0.75).abs() < 1e-12);
/// ```
pub fn kaplan_meier(records: &[SurvivalRecord]) -> Vec<CurvePoint> {
    let failures = sorted_failures(records);
    let groups = tie_groups(&failures);
    debug!(
        records = records.len(),
        failures = failures.len(),
        groups = groups.len(),
        "kaplan-meier grouping"
    );

    let mut survival = 1.0;
    groups
        .iter()
        .map(|group| {
            survival *= 1.0 - group.size as f64 / group.quantity;
            CurvePoint::new(group.time, survival)
        })
        .collect()
}

fn sorted_failures(records: &[SurvivalRecord]) -> Vec<SurvivalRecord> {
    let mut sorted = records.to_vec();
    sorted.retain(SurvivalRecord::is_failed);
    sorted.sort_by(SurvivalRecord::total_cmp);
    sorted
}

fn tie_groups(failures: &[SurvivalRecord]) -> Vec<TieGroup> {
    let mut groups: Vec<TieGroup> = Vec::new();
    for record in failures {
        match groups.last_mut() {
            Some(group) if group.time == record.time() => group.size += 1,
            _ => groups.push(TieGroup {
                time: record.time(),
                size: 1,
                quantity: record.quantity(),
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(time: f64, quantity: f64) -> SurvivalRecord {
        SurvivalRecord::failed(time, quantity).unwrap()
    }

    fn censored(time: f64, quantity: f64) -> SurvivalRecord {
        SurvivalRecord::censored(time, quantity).unwrap()
    }

    fn assert_curve(actual: &[CurvePoint], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "curve = {actual:?}");
        for (point, &(time, survival)) in actual.iter().zip(expected) {
            assert_eq!(point.time, time);
            assert!(
                (point.survival - survival).abs() < 1e-12,
                "S({time}) = {}, expected {survival}",
                point.survival
            );
        }
    }

    #[test]
    fn test_reference_scenario() {
        let records = [
            failed(10.0, 10.0),
            failed(15.0, 10.0),
            failed(15.0, 10.0),
            censored(20.0, 10.0),
            failed(30.0, 10.0),
        ];
        assert_curve(
            &kaplan_meier(&records),
            &[(10.0, 0.9), (15.0, 0.72), (30.0, 0.648)],
        );
    }

    #[test]
    fn test_single_failure() {
        assert_curve(&kaplan_meier(&[failed(7.5, 8.0)]), &[(7.5, 1.0 - 1.0 / 8.0)]);
    }

    #[test]
    fn test_only_censored_is_empty() {
        let records = [censored(1.0, 5.0), censored(2.0, 5.0)];
        assert!(kaplan_meier(&records).is_empty());
        assert!(kaplan_meier(&[]).is_empty());
    }

    #[test]
    fn test_tie_group_uses_first_quantity() {
        let records = [failed(5.0, 100.0), failed(5.0, 4.0), failed(5.0, 100.0)];
        assert_curve(&kaplan_meier(&records), &[(5.0, 1.0 - 3.0 / 4.0)]);
    }

    #[test]
    fn test_tie_group_quantity_ignores_row_order() {
        let forward = [failed(5.0, 4.0), failed(5.0, 10.0)];
        let reversed = [failed(5.0, 10.0), failed(5.0, 4.0)];
        assert_curve(&kaplan_meier(&forward), &[(5.0, 0.5)]);
        assert_eq!(kaplan_meier(&forward), kaplan_meier(&reversed));
    }

    #[test]
    fn test_group_larger_than_quantity_goes_negative() {
        let records = [failed(3.0, 2.0), failed(3.0, 2.0), failed(3.0, 2.0)];
        let curve = kaplan_meier(&records);
        assert_curve(&curve, &[(3.0, -0.5)]);
        assert!(curve[0].survival < 0.0);
    }

    #[test]
    fn test_censored_records_do_not_change_steps() {
        let with_censoring = [
            failed(1.0, 10.0),
            censored(2.0, 10.0),
            censored(3.0, 10.0),
            failed(4.0, 10.0),
        ];
        let without = [failed(1.0, 10.0), failed(4.0, 10.0)];
        assert_eq!(kaplan_meier(&with_censoring), kaplan_meier(&without));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![failed(9.0, 3.0), failed(2.0, 3.0)];
        let before = records.clone();
        let _ = kaplan_meier(&records);
        assert_eq!(records, before);
    }
}

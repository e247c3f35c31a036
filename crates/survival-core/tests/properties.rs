//! Property tests for the estimators.

use std::collections::BTreeSet;

use proptest::prelude::*;

use survival_core::{kaplan_meier, weibull};
use survival_model::{Status, SurvivalRecord};

/// Records with distinct times spread over a wide range.
fn distinct_records() -> impl Strategy<Value = Vec<SurvivalRecord>> {
    prop::collection::btree_set(1u32..10_000, 1..40)
        .prop_flat_map(|times: BTreeSet<u32>| {
            let len = times.len();
            (
                Just(times),
                prop::collection::vec(any::<bool>(), len),
                prop::collection::vec(1u32..500, len),
            )
        })
        .prop_map(|(times, failed, quantities)| {
            times
                .into_iter()
                .zip(failed)
                .zip(quantities)
                .map(|((time, failed), quantity)| {
                    let status = if failed {
                        Status::Failed
                    } else {
                        Status::Censored
                    };
                    SurvivalRecord::new(f64::from(time), status, f64::from(quantity))
                        .expect("valid record")
                })
                .collect()
        })
}

/// Records crowded onto a handful of times, mixing status and quantity
/// inside every tie.
fn tied_records() -> impl Strategy<Value = Vec<SurvivalRecord>> {
    prop::collection::vec((1u32..5, any::<bool>(), 1u32..20), 1..30).prop_map(|rows| {
        rows.into_iter()
            .map(|(time, failed, quantity)| {
                let status = if failed {
                    Status::Failed
                } else {
                    Status::Censored
                };
                SurvivalRecord::new(f64::from(time), status, f64::from(quantity))
                    .expect("valid record")
            })
            .collect()
    })
}

fn with_shuffle(
    records: impl Strategy<Value = Vec<SurvivalRecord>>,
) -> impl Strategy<Value = (Vec<SurvivalRecord>, Vec<SurvivalRecord>)> {
    records.prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
}

proptest! {
    #[test]
    fn kaplan_meier_ignores_input_order((records, shuffled) in with_shuffle(distinct_records())) {
        prop_assert_eq!(kaplan_meier(&records), kaplan_meier(&shuffled));
    }

    #[test]
    fn weibull_ignores_input_order((records, shuffled) in with_shuffle(distinct_records())) {
        prop_assert_eq!(weibull(&records), weibull(&shuffled));
    }

    #[test]
    fn kaplan_meier_ignores_order_of_tied_rows((records, shuffled) in with_shuffle(tied_records())) {
        prop_assert_eq!(kaplan_meier(&records), kaplan_meier(&shuffled));
    }

    #[test]
    fn weibull_ignores_order_of_tied_rows((records, shuffled) in with_shuffle(tied_records())) {
        prop_assert_eq!(weibull(&records), weibull(&shuffled));
    }

    #[test]
    fn kaplan_meier_is_non_increasing(
        times in prop::collection::vec(1u32..200, 1..60),
        quantity in 60u32..1_000,
    ) {
        // Every tie group is at most 60 records, so group size <= quantity.
        let records: Vec<SurvivalRecord> = times
            .iter()
            .map(|&t| SurvivalRecord::failed(f64::from(t), f64::from(quantity)).expect("valid"))
            .collect();
        let curve = kaplan_meier(&records);
        prop_assert!(curve.windows(2).all(|w| w[0].time < w[1].time));
        prop_assert!(curve.windows(2).all(|w| w[1].survival <= w[0].survival));
        prop_assert!(curve.iter().all(|p| p.survival >= 0.0 && p.survival <= 1.0));
    }

    #[test]
    fn kaplan_meier_has_one_point_per_failure_time(
        times in prop::collection::vec(1u32..50, 1..80),
    ) {
        let records: Vec<SurvivalRecord> = times
            .iter()
            .map(|&t| SurvivalRecord::failed(f64::from(t), 1_000.0).expect("valid"))
            .collect();
        let distinct: BTreeSet<u32> = times.iter().copied().collect();
        prop_assert_eq!(kaplan_meier(&records).len(), distinct.len());
    }
}

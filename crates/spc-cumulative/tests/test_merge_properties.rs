//! Property tests for cumulative merging

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use spc_core::moments;
use uuid::Uuid;

proptest! {
    #[test]
    fn count_is_sum_of_batch_sizes(
        batches in prop::collection::vec(prop::collection::vec(-1e3f64..1e3, 1..20), 1..15)
    ) {
        let agg = aggregator();
        let mut expected = 0;
        for batch in &batches {
            expected += batch.len();
            let outcome = agg.merge_batch(&key(), batch, Uuid::new_v4()).unwrap();
            prop_assert_eq!(outcome.statistic.count, expected);
            prop_assert!(outcome.statistic.historical_values.len() <= 50);
        }
    }

    #[test]
    fn pooled_moments_match_concatenation(
        batches in prop::collection::vec(prop::collection::vec(-1e3f64..1e3, 1..20), 1..10)
    ) {
        let agg = aggregator();
        for batch in &batches {
            agg.merge_batch(&key(), batch, Uuid::new_v4()).unwrap();
        }
        let all: Vec<f64> = batches.concat();
        let stat = agg.statistic(&key()).unwrap().unwrap();

        assert_relative_eq!(stat.mean, moments::mean(&all).unwrap(), epsilon = 1e-6);
        assert_relative_eq!(
            stat.std_dev,
            moments::population_variance(&all).unwrap().sqrt(),
            epsilon = 1e-6
        );
        prop_assert_eq!(stat.min, all.iter().copied().fold(f64::INFINITY, f64::min));
        prop_assert_eq!(stat.max, all.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    }

    #[test]
    fn anomaly_iff_beyond_three_sigma(value in 50.0f64..150.0) {
        let agg = seeded_aggregator();
        let outcome = agg.merge_batch(&key(), &[value], Uuid::new_v4()).unwrap();
        let expected = (value - 100.0).abs() > 15.0;
        prop_assert_eq!(outcome.anomaly.is_some(), expected);
        prop_assert_eq!(outcome.statistic.anomaly_detected, expected);
    }
}

//! Structural invariants of the correlation matrix

use proptest::prelude::*;
use spc_core::{TabularDataset, Value};
use spc_correlation::{CorrelationEngine, CorrelationTier};

fn column_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e4f64..1e4, 0..60)
}

proptest! {
    #[test]
    fn matrix_is_symmetric_with_unit_diagonal(columns in prop::collection::vec(column_strategy(), 1..8)) {
        let named: Vec<(String, Vec<f64>)> = columns
            .into_iter()
            .enumerate()
            .map(|(i, values)| (format!("c{i}"), values))
            .collect();
        let result = CorrelationEngine::default().analyze(&named);
        let m = &result.matrix;

        for i in 0..m.len() {
            prop_assert_eq!(m.at(i, i), Some(1.0));
            for j in 0..m.len() {
                let r = m.at(i, j).unwrap();
                prop_assert!((-1.0..=1.0).contains(&r));
                prop_assert_eq!(r, m.at(j, i).unwrap());
            }
        }
    }

    #[test]
    fn significant_pairs_exceed_threshold(columns in prop::collection::vec(column_strategy(), 2..6)) {
        let named: Vec<(String, Vec<f64>)> = columns
            .into_iter()
            .enumerate()
            .map(|(i, values)| (format!("c{i}"), values))
            .collect();
        let result = CorrelationEngine::default().analyze(&named);
        for pair in &result.significant {
            prop_assert!(pair.r.abs() > 0.5);
            prop_assert_eq!(pair.tier == CorrelationTier::Strong, pair.r.abs() > 0.8);
            prop_assert_eq!(result.matrix.get(&pair.column_a, &pair.column_b), Some(pair.r));
        }
        for pair in result.significant.windows(2) {
            prop_assert!(pair[0].r.abs() >= pair[1].r.abs());
        }
    }
}

#[test]
fn test_dataset_scenario() {
    let ds = TabularDataset::from_columns(vec![
        ("A", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("B", vec![2.0, 4.0, 6.0, 8.0, 10.0]),
    ])
    .unwrap();
    let result = CorrelationEngine::default()
        .analyze_dataset(&ds, &["A".to_string(), "B".to_string()])
        .unwrap();
    assert!((result.matrix.get("A", "B").unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(result.significant[0].tier, CorrelationTier::Strong);
}

#[test]
fn test_nulls_shift_alignment() {
    // Nulls are dropped before zipping, so values stay in row order but may shift
    let ds = TabularDataset::from_columns(vec![
        ("x", vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]),
        ("y", vec![Value::from(1.0), Value::Null, Value::from(3.0)]),
    ])
    .unwrap();
    let result = CorrelationEngine::default()
        .analyze_dataset(&ds, &["x".to_string(), "y".to_string()])
        .unwrap();
    // x truncated to [1, 2] against y [1, 3]
    assert!((result.matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
}

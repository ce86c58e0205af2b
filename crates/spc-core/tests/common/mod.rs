//! Shared utilities for integration tests

use spc_core::{TabularDataset, Value};

/// Build a single-column dataset from raw cells
pub fn single_column(name: &str, cells: Vec<Value>) -> TabularDataset {
    TabularDataset::from_columns(vec![(name, cells)]).unwrap()
}

/// Cells drawn from a small label alphabet, cycling through it
pub fn cycling_labels(labels: &[&str], len: usize) -> Vec<Value> {
    (0..len).map(|i| Value::from(labels[i % labels.len()])).collect()
}

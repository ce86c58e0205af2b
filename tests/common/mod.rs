//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::prelude::*;
use rand_distr::Normal;
use spc_stats::{TabularDataset, Value};

/// Install a test log subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Normally distributed measurements from a fixed seed
pub fn normal_values(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// A process upload: two measurements, one derived measurement and a line label
pub fn process_upload(n: usize, thickness_mean: f64, seed: u64) -> TabularDataset {
    let thickness = normal_values(n, thickness_mean, 0.5, seed);
    let temperature = normal_values(n, 180.0, 2.0, seed + 1);
    let weight: Vec<f64> = thickness.iter().map(|t| 3.0 * t + 1.0).collect();
    let line: Vec<Value> = (0..n).map(|i| Value::from(if i % 2 == 0 { "A" } else { "B" })).collect();

    TabularDataset::from_columns(vec![
        ("thickness", thickness.into_iter().map(Value::from).collect::<Vec<_>>()),
        ("temperature", temperature.into_iter().map(Value::from).collect()),
        ("weight", weight.into_iter().map(Value::from).collect()),
        ("line", line),
    ])
    .unwrap()
}

//! Descriptive statistics for numeric dataset columns
//!
//! Every numeric column is summarised by count, mean, population standard
//! deviation, min, max and median. Columns without finite values are left
//! out of the result rather than reported with placeholder numbers.
//!
//! # Example
//!
//! ```rust
//! use spc_descriptive::describe;
//!
//! let stats = describe(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
//! assert_eq!(stats.mean, 30.0);
//! assert_eq!(stats.median, 30.0);
//! assert!((stats.std_dev - 200f64.sqrt()).abs() < 1e-12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use spc_core::moments::{finite_sorted, median_sorted, sum_sq_dev};
use spc_core::{classify_columns, Result, TabularDataset};

/// Summary statistics of one numeric column
///
/// `std_dev` uses the population formula Σ(x−mean)²/n.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl DescriptiveStatistics {
    /// Population variance
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Spread between the extremes
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

impl fmt::Display for DescriptiveStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}, mean={:.4}, sd={:.4}, min={:.4}, median={:.4}, max={:.4}",
            self.count, self.mean, self.std_dev, self.min, self.median, self.max
        )
    }
}

/// Statistics for a named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub statistics: DescriptiveStatistics,
}

/// Summarise a slice of measurements
///
/// Non-finite values are ignored. Returns `None` when no finite value remains.
pub fn describe(values: &[f64]) -> Option<DescriptiveStatistics> {
    let sorted = finite_sorted(values);
    describe_sorted(&sorted)
}

/// Summarise measurements that are already finite and sorted ascending
pub fn describe_sorted(sorted: &[f64]) -> Option<DescriptiveStatistics> {
    let n = sorted.len();
    let median = median_sorted(sorted)?;
    let (min, max) = (sorted[0], sorted[n - 1]);
    // A flat column has no spread, whatever the summation rounding says
    let (mean, std_dev) = if min == max {
        (min, 0.0)
    } else {
        let mean = sorted.iter().sum::<f64>() / n as f64;
        (mean, (sum_sq_dev(sorted, mean) / n as f64).sqrt())
    };

    Some(DescriptiveStatistics {
        count: n,
        mean,
        std_dev,
        min,
        max,
        median,
    })
}

/// Summarise the given numeric columns of a dataset, in the order given
///
/// Columns with no usable values are skipped. Unknown column names are an error.
pub fn describe_columns(dataset: &TabularDataset, columns: &[String]) -> Result<Vec<ColumnStatistics>> {
    let extracted = columns
        .iter()
        .map(|name| dataset.numeric_values(name).map(|values| (name, values)))
        .collect::<Result<Vec<_>>>()?;

    let summarise = |(name, values): (&String, Vec<f64>)| {
        let statistics = describe(&values);
        if statistics.is_none() {
            tracing::debug!(column = %name, "Skipping column without numeric values");
        }
        statistics.map(|statistics| ColumnStatistics {
            column: name.clone(),
            statistics,
        })
    };

    #[cfg(feature = "parallel")]
    let result = {
        use rayon::prelude::*;
        extracted.into_par_iter().filter_map(summarise).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let result = extracted.into_iter().filter_map(summarise).collect();

    Ok(result)
}

/// Summarise every numeric column of a dataset, in header order
pub fn describe_dataset(dataset: &TabularDataset) -> Result<Vec<ColumnStatistics>> {
    let numeric = classify_columns(dataset).numeric;
    describe_columns(dataset, &numeric)
}

//! Fixed-bin-count histograms for numeric process columns
//!
//! Each numeric column is binned into a fixed number of equal-width bins
//! spanning its observed range. Bin counts always sum to the number of finite
//! values in the column; a constant column produces a single bin instead of
//! dividing by a zero width.
//!
//! # Example
//!
//! ```rust
//! use spc_histogram::{FixedWidthBuilder, HistogramBuilder};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = FixedWidthBuilder::new(5).build(&data);
//!
//! assert_eq!(histogram.counts().iter().sum::<usize>(), data.len());
//! for bin in histogram.bins() {
//!     println!("  {bin}");
//! }
//! ```

pub mod builders;
pub mod traits;
pub mod types;

use serde::{Deserialize, Serialize};
use spc_core::{Result, TabularDataset};

// Re-export main types and traits
pub use builders::FixedWidthBuilder;
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramBin};

/// Histogram of a named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHistogram {
    pub column: String,
    pub histogram: Histogram,
}

/// Create a histogram with a fixed number of equal-width bins
pub fn fixed_histogram(data: &[f64], num_bins: usize) -> Histogram {
    FixedWidthBuilder::new(num_bins).build(data)
}

/// Create one histogram per named numeric column, in the order given
pub fn column_histograms(
    dataset: &TabularDataset,
    columns: &[String],
    num_bins: usize,
) -> Result<Vec<ColumnHistogram>> {
    let builder = FixedWidthBuilder::new(num_bins);
    let extracted = columns
        .iter()
        .map(|name| dataset.numeric_values(name).map(|values| (name, values)))
        .collect::<Result<Vec<_>>>()?;

    let bin = |(name, values): (&String, Vec<f64>)| ColumnHistogram {
        column: name.clone(),
        histogram: builder.build(&values),
    };

    #[cfg(feature = "parallel")]
    let result = {
        use rayon::prelude::*;
        extracted.into_par_iter().map(bin).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let result = extracted.into_iter().map(bin).collect();

    Ok(result)
}

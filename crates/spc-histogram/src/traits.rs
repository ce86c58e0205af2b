//! Core traits for histogram building

use crate::types::Histogram;

/// Trait for building histograms from sample data
pub trait HistogramBuilder {
    /// Build a histogram from the given sample
    ///
    /// Non-finite values are ignored; an empty sample yields an empty histogram.
    fn build(&self, sample: &[f64]) -> Histogram;

    /// Build a histogram from finite, pre-sorted data
    ///
    /// Default implementation just calls build().
    fn build_sorted(&self, sorted_sample: &[f64]) -> Histogram {
        self.build(sorted_sample)
    }

    /// Get the target number of bins (if known)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}

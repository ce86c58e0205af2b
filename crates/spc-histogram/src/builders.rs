//! Histogram building strategies

use spc_core::config::DEFAULT_BIN_COUNT;
use spc_core::moments::finite_sorted;

use crate::traits::HistogramBuilder;
use crate::types::{Histogram, HistogramBin};

/// Half-width of the bin used when every value is identical
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// Fixed-width histogram builder
///
/// Partitions [min, max] into a fixed number of equal-width bins. A value `v`
/// lands in bin `clamp(floor((v − min) / width), 0, bins − 1)`, so the maximum
/// falls in the last bin and the counts always sum to the number of values.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthBuilder {
    num_bins: usize,
}

impl FixedWidthBuilder {
    /// Create a new fixed-width histogram builder
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins: num_bins.max(1),
        }
    }

    /// Bin index of a value, clamped into range
    fn bin_index(&self, value: f64, min: f64, width: f64) -> usize {
        let raw = ((value - min) / width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.num_bins - 1)
        }
    }
}

impl Default for FixedWidthBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BIN_COUNT)
    }
}

impl HistogramBuilder for FixedWidthBuilder {
    fn build(&self, sample: &[f64]) -> Histogram {
        self.build_sorted(&finite_sorted(sample))
    }

    fn build_sorted(&self, sorted_sample: &[f64]) -> Histogram {
        let total = sorted_sample.len();
        let (Some(&min), Some(&max)) = (sorted_sample.first(), sorted_sample.last()) else {
            return Histogram::empty();
        };

        if max == min {
            // All values are the same: one bin of unit width centred on the value
            let bin = HistogramBin::new(
                min - DEGENERATE_HALF_WIDTH,
                max + DEGENERATE_HALF_WIDTH,
                total,
                total,
            );
            return Histogram::new(vec![bin], total, min, max);
        }

        let width = (max - min) / self.num_bins as f64;
        let mut counts = vec![0usize; self.num_bins];
        for &value in sorted_sample {
            counts[self.bin_index(value, min, width)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let start = min + i as f64 * width;
                let end = if i == self.num_bins - 1 {
                    max // Ensure last bin includes max
                } else {
                    min + (i + 1) as f64 * width
                };
                HistogramBin::new(start, end, count, total)
            })
            .collect();

        Histogram::new(bins, total, min, max)
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.num_bins)
    }
}

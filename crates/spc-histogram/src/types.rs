//! Core types for histogram representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub range_start: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub range_end: f64,
    /// Number of values in this bin
    pub count: usize,
    /// Density (count / (total_count * bin_width))
    pub density: f64,
}

impl HistogramBin {
    /// Create a new histogram bin
    pub fn new(range_start: f64, range_end: f64, count: usize, total_count: usize) -> Self {
        let width = range_end - range_start;
        let density = if width > 0.0 && total_count > 0 {
            count as f64 / (total_count as f64 * width)
        } else {
            0.0
        };

        Self {
            range_start,
            range_end,
            count,
            density,
        }
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}): count={}",
            self.range_start, self.range_end, self.count
        )
    }
}

/// A histogram of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// The bins that make up the histogram, ordered by range
    bins: Vec<HistogramBin>,
    /// Total number of data points
    total_count: usize,
    /// Minimum value in the data
    min: f64,
    /// Maximum value in the data
    max: f64,
}

impl Histogram {
    /// Create a new histogram
    pub fn new(bins: Vec<HistogramBin>, total_count: usize, min: f64, max: f64) -> Self {
        Self {
            bins,
            total_count,
            min,
            max,
        }
    }

    /// Histogram of no data
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0.0, 0.0)
    }

    /// Get the bins
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Get the total count of data points
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Get the minimum value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Get the maximum value
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Get counts as a vector
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let Some(last) = self.bins.last() else {
            return vec![];
        };
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.range_start).collect();
        edges.push(last.range_end);
        edges
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.3}, {:.3}])",
            self.len(),
            self.total_count,
            self.min,
            self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bin() {
        let bin = HistogramBin::new(0.0, 1.0, 5, 10);
        assert_eq!(bin.density, 0.5); // 5 / (10 * 1.0)
        assert_eq!(HistogramBin::new(1.0, 1.0, 3, 3).density, 0.0);
    }

    #[test]
    fn test_histogram() {
        let bins = vec![
            HistogramBin::new(0.0, 1.0, 2, 10),
            HistogramBin::new(1.0, 2.0, 5, 10),
            HistogramBin::new(2.0, 3.0, 3, 10),
        ];
        let hist = Histogram::new(bins, 10, 0.0, 3.0);

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total_count(), 10);
        assert_eq!(hist.counts(), vec![2, 5, 3]);
        assert_eq!(hist.edges(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::empty();
        assert!(hist.is_empty());
        assert!(hist.edges().is_empty());
        assert!(hist.counts().is_empty());
    }
}

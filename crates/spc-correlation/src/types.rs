//! Types produced by the correlation engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symmetric Pearson correlation matrix over named numeric columns
///
/// The diagonal is always 1 and every entry lies in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major n×n values
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Identity matrix over the given columns
    pub(crate) fn identity(columns: Vec<String>) -> Self {
        let n = columns.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
        }
        Self { columns, values }
    }

    /// Set both (i, j) and (j, i)
    pub(crate) fn set_pair(&mut self, i: usize, j: usize, r: f64) {
        let n = self.columns.len();
        self.values[i * n + j] = r;
        self.values[j * n + i] = r;
    }

    /// Column names in matrix order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the matrix covers no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Entry at matrix position (i, j)
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.columns.len();
        (i < n && j < n).then(|| self.values[i * n + j])
    }

    /// Correlation between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.at(i, j)
    }

    /// Rows of the matrix, one per column
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.columns.len().max(1))
    }
}

/// Strength tier of a significant correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationTier {
    Moderate,
    Strong,
}

impl fmt::Display for CorrelationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationTier::Moderate => write!(f, "moderate"),
            CorrelationTier::Strong => write!(f, "strong"),
        }
    }
}

/// A column pair whose |r| exceeds the significance threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantCorrelation {
    pub column_a: String,
    pub column_b: String,
    pub r: f64,
    pub tier: CorrelationTier,
}

impl SignificantCorrelation {
    /// Check if the columns move in the same direction
    pub fn is_positive(&self) -> bool {
        self.r > 0.0
    }
}

impl fmt::Display for SignificantCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}: r={:.3} ({})",
            self.column_a, self.column_b, self.r, self.tier
        )
    }
}

/// Full output of a correlation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    pub matrix: CorrelationMatrix,
    /// Significant pairs sorted by |r| descending
    pub significant: Vec<SignificantCorrelation>,
    /// Numeric columns left out because of the column cap
    pub truncated_columns: Vec<String>,
}

//! Pearson correlation over row-aligned numeric columns

use spc_core::config::CorrelationConfig;
use spc_core::{Result, TabularDataset};

use crate::types::{CorrelationAnalysis, CorrelationMatrix, CorrelationTier, SignificantCorrelation};

/// Pearson correlation of two row-aligned series
///
/// Values are paired by index up to the shorter length; no join-key
/// realignment is attempted. A zero denominator (either series constant over
/// the paired range) or fewer than two pairs yields 0.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (sxy / denominator).clamp(-1.0, 1.0)
}

/// Correlation engine with configurable significance thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl CorrelationEngine {
    /// Create an engine with the given thresholds
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Classify |r| into a tier, `None` when not significant
    pub fn tier(&self, r: f64) -> Option<CorrelationTier> {
        let magnitude = r.abs();
        if magnitude > self.config.strong {
            Some(CorrelationTier::Strong)
        } else if magnitude > self.config.moderate {
            Some(CorrelationTier::Moderate)
        } else {
            None
        }
    }

    /// Correlate named columns given as (name, values) pairs
    ///
    /// Columns beyond the configured cap are left out with a warning and
    /// listed in [`CorrelationAnalysis::truncated_columns`].
    pub fn analyze(&self, columns: &[(String, Vec<f64>)]) -> CorrelationAnalysis {
        let cap = self.config.max_columns.max(1);
        let (kept, dropped) = columns.split_at(columns.len().min(cap));
        if !dropped.is_empty() {
            tracing::warn!(
                columns = columns.len(),
                cap,
                "Correlation matrix capped; {} numeric columns left out",
                dropped.len()
            );
        }

        let n = kept.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let correlate = |&(i, j): &(usize, usize)| (i, j, pearson(&kept[i].1, &kept[j].1));

        #[cfg(feature = "parallel")]
        let coefficients: Vec<(usize, usize, f64)> = {
            use rayon::prelude::*;
            pairs.par_iter().map(correlate).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let coefficients: Vec<(usize, usize, f64)> = pairs.iter().map(correlate).collect();

        let mut matrix = CorrelationMatrix::identity(kept.iter().map(|(name, _)| name.clone()).collect());
        let mut significant = Vec::new();
        for (i, j, r) in coefficients {
            matrix.set_pair(i, j, r);
            if let Some(tier) = self.tier(r) {
                significant.push(SignificantCorrelation {
                    column_a: kept[i].0.clone(),
                    column_b: kept[j].0.clone(),
                    r,
                    tier,
                });
            }
        }
        significant.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));

        tracing::debug!(
            columns = n,
            pairs = pairs.len(),
            significant = significant.len(),
            "Computed correlation matrix"
        );

        CorrelationAnalysis {
            matrix,
            significant,
            truncated_columns: dropped.iter().map(|(name, _)| name.clone()).collect(),
        }
    }

    /// Correlate the named numeric columns of a dataset
    pub fn analyze_dataset(&self, dataset: &TabularDataset, columns: &[String]) -> Result<CorrelationAnalysis> {
        let extracted = columns
            .iter()
            .map(|name| Ok((name.clone(), dataset.numeric_values(name)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.analyze(&extracted))
    }
}

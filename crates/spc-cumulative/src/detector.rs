//! Trend-shift detection between a stored statistic and an incoming batch

use spc_core::config::CumulativeConfig;
use spc_core::Severity;

use crate::types::{BatchSummary, CumulativeParameterStatistic};

/// A batch mean that moved too far from the stored mean
#[derive(Debug, Clone, PartialEq)]
pub struct TrendShift {
    pub prior_mean: f64,
    pub batch_mean: f64,
    /// |batch mean − prior mean| in units of the stored σ
    pub sigma_distance: f64,
    pub severity: Severity,
    pub message: String,
}

/// Sigma-distance rule on batch means
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendShiftDetector {
    sigma: f64,
    high_severity_sigma: f64,
}

impl Default for TrendShiftDetector {
    fn default() -> Self {
        Self::from_config(&CumulativeConfig::default())
    }
}

impl TrendShiftDetector {
    pub fn new(sigma: f64, high_severity_sigma: f64) -> Self {
        Self {
            sigma,
            high_severity_sigma,
        }
    }

    pub fn from_config(config: &CumulativeConfig) -> Self {
        Self::new(config.anomaly_sigma, config.high_severity_sigma)
    }

    /// Compare a batch against the stored statistic
    ///
    /// Fires only when the stored σ is strictly positive and the mean moved
    /// strictly more than `sigma` stored standard deviations.
    pub fn detect(&self, prior: &CumulativeParameterStatistic, batch: &BatchSummary) -> Option<TrendShift> {
        if prior.std_dev.is_nan() || prior.std_dev <= 0.0 {
            return None;
        }
        let shift = (batch.mean() - prior.mean).abs();
        if shift.is_nan() || shift <= self.sigma * prior.std_dev {
            return None;
        }

        let sigma_distance = shift / prior.std_dev;
        let severity = if sigma_distance > self.high_severity_sigma {
            Severity::High
        } else {
            Severity::Medium
        };
        let message = format!(
            "Mean of {} shifted from {:.2} to {:.2} ({:.1}σ, threshold {}σ)",
            prior.key.parameter_name,
            prior.mean,
            batch.mean(),
            sigma_distance,
            self.sigma
        );

        Some(TrendShift {
            prior_mean: prior.mean,
            batch_mean: batch.mean(),
            sigma_distance,
            severity,
            message,
        })
    }
}

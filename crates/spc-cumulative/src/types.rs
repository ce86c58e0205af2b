//! Types used for cumulative statistics tracking

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spc_core::moments::{finite_sorted, median_sorted};
use spc_core::{AnomalyEvent, DeliveryReport, Error, Moments, Result};
use uuid::Uuid;

/// Identity of a cumulative statistic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatisticKey {
    pub parameter_name: String,
    pub dataset_type: String,
}

impl StatisticKey {
    /// Create a new key
    pub fn new(parameter_name: impl Into<String>, dataset_type: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            dataset_type: dataset_type.into(),
        }
    }
}

impl fmt::Display for StatisticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dataset_type, self.parameter_name)
    }
}

/// Tracking state of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    /// Never observed
    Uninitialized,
    /// At least one batch merged
    Tracking,
}

/// One batch mean kept in the sliding history window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalValue {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub upload_id: Uuid,
}

/// Persistent per-parameter statistics accumulated across uploads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeParameterStatistic {
    pub key: StatisticKey,
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation under the configured merge policy
    pub std_dev: f64,
    /// Sum of squared deviations from `mean` backing the pooled merge
    #[serde(default)]
    pub sum_sq_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Median of the most recent batch
    pub median: f64,
    /// Last measurement of the most recent batch, in row order
    pub last_value: f64,
    /// Batch means, oldest first
    pub historical_values: VecDeque<HistoricalValue>,
    /// Whether the most recent batch raised an anomaly
    pub anomaly_detected: bool,
    pub anomaly_details: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl CumulativeParameterStatistic {
    /// Build a record from an externally known summary
    ///
    /// The sum of squared deviations is reconstructed as σ²·n.
    pub fn from_summary(
        key: StatisticKey,
        count: usize,
        mean: f64,
        std_dev: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            key,
            count,
            mean,
            std_dev,
            sum_sq_dev: std_dev * std_dev * count as f64,
            min,
            max,
            median: mean,
            last_value: mean,
            historical_values: VecDeque::new(),
            anomaly_detected: false,
            anomaly_details: None,
            last_updated: Utc::now(),
        }
    }

    /// Stored moments as a mergeable summary
    pub fn moments(&self) -> Moments {
        Moments {
            count: self.count,
            mean: self.mean,
            m2: self.sum_sq_dev,
            min: self.min,
            max: self.max,
        }
    }
}

impl fmt::Display for CumulativeParameterStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: n={}, mean={:.4}, sd={:.4}, range=[{:.4}, {:.4}], history={}",
            self.key,
            self.count,
            self.mean,
            self.std_dev,
            self.min,
            self.max,
            self.historical_values.len()
        )
    }
}

/// Statistics of one incoming batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSummary {
    pub moments: Moments,
    pub median: f64,
    pub last_value: f64,
}

impl BatchSummary {
    /// Summarise a batch, ignoring non-finite values
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] when no finite value remains.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (Some(moments), Some(&last_value)) = (Moments::from_values(&finite), finite.last()) else {
            return Err(Error::empty_input());
        };
        let median = median_sorted(&finite_sorted(&finite)).unwrap_or(moments.mean);
        Ok(Self {
            moments,
            median,
            last_value,
        })
    }

    pub fn count(&self) -> usize {
        self.moments.count
    }

    pub fn mean(&self) -> f64 {
        self.moments.mean
    }

    /// Population standard deviation of the batch
    pub fn std_dev(&self) -> f64 {
        self.moments.population_std_dev()
    }
}

/// Result of merging one batch into a cumulative statistic
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// State of the key before the merge
    pub previous_state: TrackingState,
    /// Record after the merge
    pub statistic: CumulativeParameterStatistic,
    /// Trend shift raised by this batch, if any
    pub anomaly: Option<AnomalyEvent>,
    /// Whether the record reached the store
    pub persisted: bool,
    /// Fan-out result when an anomaly was published
    pub delivery: Option<DeliveryReport>,
}

//! Configuration types and named thresholds
//!
//! Every magic number used by the engine lives here. [`AnalysisConfig`]
//! bundles them so a caller can override any subset from JSON; missing
//! fields fall back to the constants below.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A column is numeric when more than this share of its non-null cells parse as numbers
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;

/// A non-numeric column is categorical when its distinct/total ratio is below this
pub const UNIQUE_RATIO_THRESHOLD: f64 = 0.5;

/// Default number of equal-width histogram bins
pub const DEFAULT_BIN_COUNT: usize = 12;

/// |r| above which a pair is reported as significant (Moderate)
pub const MODERATE_CORRELATION: f64 = 0.5;

/// |r| above which a significant pair is Strong
pub const STRONG_CORRELATION: f64 = 0.8;

/// Numeric columns beyond this count are left out of the correlation matrix
pub const MAX_CORRELATION_COLUMNS: usize = 50;

/// Cpk at or above which a process is Capable
pub const CAPABLE_CPK: f64 = 1.33;

/// Cpk at or above which a process is Marginal
pub const MARGINAL_CPK: f64 = 1.0;

/// Sample sizes above this use subgroup-average chart framing
pub const SUBGROUP_CHART_MIN_SAMPLES: usize = 30;

/// Maximum number of batch means kept per cumulative statistic
pub const HISTORY_CAPACITY: usize = 50;

/// Trend-shift threshold in stored standard deviations
pub const ANOMALY_SIGMA: f64 = 3.0;

/// Shifts beyond this many sigmas are reported with High severity
pub const HIGH_SEVERITY_SIGMA: f64 = 6.0;

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!("{name} must lie in [0, 1], got {value}")))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!("{name} must be finite and positive, got {value}")))
    }
}

fn check_nonzero(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidParameter(format!("{name} must be at least 1")));
    }
    Ok(())
}

/// How the cumulative aggregator combines the stored and batch spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevMerge {
    /// Chan et al. parallel combination of sums of squared deviations
    #[default]
    Pooled,
    /// Replace the stored spread with the latest batch's spread
    LatestBatch,
}

/// Thresholds for the column classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub numeric_ratio: f64,
    pub unique_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            numeric_ratio: NUMERIC_RATIO_THRESHOLD,
            unique_ratio: UNIQUE_RATIO_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("numeric_ratio", self.numeric_ratio)?;
        check_unit_interval("unique_ratio", self.unique_ratio)
    }
}

/// Thresholds for the correlation engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub moderate: f64,
    pub strong: f64,
    pub max_columns: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            moderate: MODERATE_CORRELATION,
            strong: STRONG_CORRELATION,
            max_columns: MAX_CORRELATION_COLUMNS,
        }
    }
}

impl CorrelationConfig {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("moderate", self.moderate)?;
        check_unit_interval("strong", self.strong)?;
        if self.moderate > self.strong {
            return Err(Error::InvalidParameter(format!(
                "moderate ({}) must not exceed strong ({})",
                self.moderate, self.strong
            )));
        }
        check_nonzero("max_columns", self.max_columns)
    }
}

/// Thresholds for capability classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    pub capable_cpk: f64,
    pub marginal_cpk: f64,
    pub subgroup_chart_min_samples: usize,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            capable_cpk: CAPABLE_CPK,
            marginal_cpk: MARGINAL_CPK,
            subgroup_chart_min_samples: SUBGROUP_CHART_MIN_SAMPLES,
        }
    }
}

impl CapabilityConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.capable_cpk.is_finite() || !self.marginal_cpk.is_finite() {
            return Err(Error::InvalidParameter("Cpk thresholds must be finite".to_string()));
        }
        if self.marginal_cpk > self.capable_cpk {
            return Err(Error::InvalidParameter(format!(
                "marginal_cpk ({}) must not exceed capable_cpk ({})",
                self.marginal_cpk, self.capable_cpk
            )));
        }
        Ok(())
    }
}

/// Settings for the cumulative aggregator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CumulativeConfig {
    pub history_capacity: usize,
    pub anomaly_sigma: f64,
    pub high_severity_sigma: f64,
    pub std_dev_merge: StdDevMerge,
}

impl Default for CumulativeConfig {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            anomaly_sigma: ANOMALY_SIGMA,
            high_severity_sigma: HIGH_SEVERITY_SIGMA,
            std_dev_merge: StdDevMerge::default(),
        }
    }
}

impl CumulativeConfig {
    pub fn validate(&self) -> Result<()> {
        check_nonzero("history_capacity", self.history_capacity)?;
        check_positive("anomaly_sigma", self.anomaly_sigma)?;
        check_positive("high_severity_sigma", self.high_severity_sigma)?;
        if self.high_severity_sigma < self.anomaly_sigma {
            return Err(Error::InvalidParameter(format!(
                "high_severity_sigma ({}) must not be below anomaly_sigma ({})",
                self.high_severity_sigma, self.anomaly_sigma
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub bin_count: usize,
    pub correlation: CorrelationConfig,
    pub capability: CapabilityConfig,
    pub cumulative: CumulativeConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            bin_count: DEFAULT_BIN_COUNT,
            correlation: CorrelationConfig::default(),
            capability: CapabilityConfig::default(),
            cumulative: CumulativeConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on malformed JSON, [`Error::InvalidParameter`] when
    /// a threshold is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        check_nonzero("bin_count", self.bin_count)?;
        self.correlation.validate()?;
        self.capability.validate()?;
        self.cumulative.validate()
    }
}

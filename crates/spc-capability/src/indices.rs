//! Capability indices (Cp, Cpu, Cpl, Cpk, Ppk, Cpm) and their classification
//!
//! Ppk is reported equal to Cpk: only one σ estimate is available, so the
//! short-term/long-term split collapses.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed., Chapter 8.
//! - Chan, Cheng & Spiring (1988), "A New Measure of Process Capability: Cpm".

use std::fmt;

use serde::{Deserialize, Serialize};
use spc_core::config::CapabilityConfig;

use crate::limits::SpecLimits;

/// A capability index, or the "not computable" sentinel when σ is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityIndex {
    Value(f64),
    NotComputable,
}

impl CapabilityIndex {
    /// Get the numeric value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            CapabilityIndex::Value(v) => Some(*v),
            CapabilityIndex::NotComputable => None,
        }
    }

    /// Check if the index could not be computed
    pub fn is_not_computable(&self) -> bool {
        matches!(self, CapabilityIndex::NotComputable)
    }

    fn from_ratio(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 && denominator.is_finite() {
            CapabilityIndex::Value(numerator / denominator)
        } else {
            CapabilityIndex::NotComputable
        }
    }
}

impl fmt::Display for CapabilityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityIndex::Value(v) => write!(f, "{v:.3}"),
            CapabilityIndex::NotComputable => write!(f, "N/A"),
        }
    }
}

/// Capability verdict derived from Cpk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityClass {
    /// Cpk ≥ 1.33
    Capable,
    /// 1.0 ≤ Cpk < 1.33
    Marginal,
    /// Cpk < 1.0
    NotCapable,
    /// σ = 0, Cpk undefined
    NotComputable,
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityClass::Capable => write!(f, "Capable"),
            CapabilityClass::Marginal => write!(f, "Marginal"),
            CapabilityClass::NotCapable => write!(f, "Not Capable"),
            CapabilityClass::NotComputable => write!(f, "N/A"),
        }
    }
}

/// Classify a Cpk against the configured thresholds
pub fn classify(cpk: CapabilityIndex, config: &CapabilityConfig) -> CapabilityClass {
    match cpk.value() {
        None => CapabilityClass::NotComputable,
        Some(v) if v >= config.capable_cpk => CapabilityClass::Capable,
        Some(v) if v >= config.marginal_cpk => CapabilityClass::Marginal,
        Some(_) => CapabilityClass::NotCapable,
    }
}

/// All indices for one mean/σ pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityIndices {
    /// Cp = (USL − LSL) / 6σ
    pub cp: CapabilityIndex,
    /// Cpu = (USL − mean) / 3σ
    pub cpu: CapabilityIndex,
    /// Cpl = (mean − LSL) / 3σ
    pub cpl: CapabilityIndex,
    /// Cpk = min(Cpu, Cpl)
    pub cpk: CapabilityIndex,
    /// Reported equal to Cpk
    pub ppk: CapabilityIndex,
    /// Cpm = Cp / √(1 + ((mean − target)/σ)²)
    pub cpm: CapabilityIndex,
}

impl CapabilityIndices {
    /// Compute every index from a mean, a standard deviation and the limits
    ///
    /// A zero (or non-finite) σ yields [`CapabilityIndex::NotComputable`] for
    /// every index instead of dividing by zero.
    pub fn compute(mean: f64, std_dev: f64, limits: &SpecLimits) -> Self {
        let cp = CapabilityIndex::from_ratio(limits.tolerance(), 6.0 * std_dev);
        let cpu = CapabilityIndex::from_ratio(limits.upper_spec_limit - mean, 3.0 * std_dev);
        let cpl = CapabilityIndex::from_ratio(mean - limits.lower_spec_limit, 3.0 * std_dev);
        let cpk = match (cpu, cpl) {
            (CapabilityIndex::Value(u), CapabilityIndex::Value(l)) => CapabilityIndex::Value(u.min(l)),
            _ => CapabilityIndex::NotComputable,
        };
        let cpm = match cp {
            CapabilityIndex::Value(cp) => {
                let deviation_ratio = (mean - limits.target) / std_dev;
                CapabilityIndex::Value(cp / (1.0 + deviation_ratio * deviation_ratio).sqrt())
            }
            CapabilityIndex::NotComputable => CapabilityIndex::NotComputable,
        };

        Self {
            cp,
            cpu,
            cpl,
            cpk,
            ppk: cpk,
            cpm,
        }
    }
}

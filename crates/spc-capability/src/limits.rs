//! Specification limits supplied by the user

use serde::{Deserialize, Serialize};
use spc_core::{Error, Result};

/// Lower/upper specification limits and the nominal target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    pub lower_spec_limit: f64,
    pub upper_spec_limit: f64,
    pub target: f64,
}

impl SpecLimits {
    /// Create two-sided limits with the target at the midpoint
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when a limit is non-finite or
    /// `upper <= lower`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        let limits = Self {
            lower_spec_limit: lower,
            upper_spec_limit: upper,
            target: (lower + upper) / 2.0,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Override the nominal target
    pub fn with_target(mut self, target: f64) -> Result<Self> {
        self.target = target;
        self.validate()?;
        Ok(self)
    }

    /// Check that the limits describe a usable tolerance band
    pub fn validate(&self) -> Result<()> {
        if !self.lower_spec_limit.is_finite() {
            return Err(Error::InvalidParameter("LSL must be finite".to_string()));
        }
        if !self.upper_spec_limit.is_finite() {
            return Err(Error::InvalidParameter("USL must be finite".to_string()));
        }
        if !self.target.is_finite() {
            return Err(Error::InvalidParameter("Target must be finite".to_string()));
        }
        if self.upper_spec_limit <= self.lower_spec_limit {
            return Err(Error::InvalidParameter(format!(
                "USL ({}) must be greater than LSL ({})",
                self.upper_spec_limit, self.lower_spec_limit
            )));
        }
        Ok(())
    }

    /// Width of the tolerance band
    pub fn tolerance(&self) -> f64 {
        self.upper_spec_limit - self.lower_spec_limit
    }

    /// Check if a value is within [LSL, USL]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower_spec_limit..=self.upper_spec_limit).contains(&value)
    }
}

//! Process capability analysis
//!
//! Given the measurements of one parameter and its user-supplied
//! specification limits, computes:
//!
//! - **Cp**, **Cpu**, **Cpl**, **Cpk**: potential and actual capability
//! - **Ppk**: reported equal to Cpk (single σ estimate)
//! - **Cpm**: Taguchi capability against the nominal target
//! - **UCL / LCL**: mean ± 3σ control limits
//! - within / out-of-spec counts and a Capable / Marginal / Not Capable verdict
//!
//! σ is the sample standard deviation (n − 1). A zero σ never divides: every
//! index becomes [`CapabilityIndex::NotComputable`].
//!
//! # Example
//!
//! ```rust
//! use spc_capability::{CapabilityAnalyzer, CapabilityClass, SpecLimits};
//!
//! let limits = SpecLimits::new(9.0, 11.0).unwrap();
//! let data = [9.9, 10.0, 10.1, 10.0, 9.95, 10.05, 10.0, 9.98];
//!
//! let outcome = CapabilityAnalyzer::default().analyze(&data, &limits).unwrap();
//! let report = outcome.report().unwrap();
//! assert_eq!(report.classification, CapabilityClass::Capable);
//! ```

pub mod analyzer;
pub mod indices;
pub mod limits;

pub use analyzer::{CapabilityAnalyzer, CapabilityOutcome, CapabilityReport, ChartStyle, MIN_CAPABILITY_SAMPLES};
pub use indices::{classify, CapabilityClass, CapabilityIndex, CapabilityIndices};
pub use limits::SpecLimits;

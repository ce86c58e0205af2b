//! Correlation structure of numeric process columns
//!
//! Computes the full symmetric Pearson matrix over numeric columns and
//! extracts the pairs whose |r| exceeds 0.5 (Moderate) or 0.8 (Strong).
//! Columns are assumed row-aligned: pairs are zipped by row index and
//! truncated to the shorter column.
//!
//! The pairwise work is quadratic in the number of columns, so the engine
//! caps the columns it correlates (50 by default) and reports the rest.
//!
//! # Example
//!
//! ```rust
//! use spc_correlation::{CorrelationEngine, CorrelationTier};
//!
//! let columns = vec![
//!     ("A".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
//!     ("B".to_string(), vec![2.0, 4.0, 6.0, 8.0, 10.0]),
//! ];
//! let result = CorrelationEngine::default().analyze(&columns);
//!
//! assert_eq!(result.significant.len(), 1);
//! assert_eq!(result.significant[0].tier, CorrelationTier::Strong);
//! ```

pub mod engine;
pub mod types;

pub use engine::{pearson, CorrelationEngine};
pub use types::{CorrelationAnalysis, CorrelationMatrix, CorrelationTier, SignificantCorrelation};

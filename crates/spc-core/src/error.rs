//! Error types for process statistics
//!
//! Provides a unified error type for all spc-stats crates. Pure computations
//! prefer sentinels over errors; these variants cover invalid inputs and the
//! storage / notification seams of the cumulative aggregator.

use thiserror::Error;

/// Core error type for process statistics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested column does not exist in the dataset
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Cumulative statistics storage failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Anomaly delivery to a subscriber failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for duplicated dataset headers
    pub fn duplicate_header(name: &str) -> Self {
        Self::InvalidInput(format!("Duplicate column header '{name}'"))
    }

    /// Create an error for a column that is missing or not numeric
    pub fn missing_column(name: &str) -> Self {
        Self::InvalidColumn(format!("'{name}' is not a column of the dataset"))
    }
}

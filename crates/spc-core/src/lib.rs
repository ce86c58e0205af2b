//! Core types for process statistics
//!
//! This crate provides the foundation shared by every spc-stats crate:
//!
//! - [`Value`] and [`TabularDataset`]: tagged cells and the uploaded table shape
//! - [`classify`]: numeric / categorical / unclassified column partitioning
//! - [`moments`]: mean, variance, median and mergeable [`Moments`]
//! - [`config`]: named thresholds and the serde-loadable [`AnalysisConfig`]
//! - [`events`]: anomaly events and the best-effort [`AnomalyBus`]
//! - [`error`]: the unified [`Error`] type
//!
//! # Example
//!
//! ```rust
//! use spc_core::{classify_columns, TabularDataset, Value};
//!
//! let dataset = TabularDataset::from_columns(vec![
//!     ("thickness", vec![Value::from(1.02), Value::from(0.98), Value::from(1.01)]),
//!     ("line", vec![Value::from("A"), Value::from("A"), Value::from("B")]),
//! ])
//! .unwrap();
//!
//! let columns = classify_columns(&dataset);
//! assert_eq!(columns.numeric, vec!["thickness".to_string()]);
//! ```

pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod events;
pub mod moments;
pub mod value;

// Re-export core types
pub use classify::{classify_columns, ColumnClassification, ColumnClassifier, ColumnKind, ColumnProfile};
pub use config::{
    AnalysisConfig, CapabilityConfig, ClassifierConfig, CorrelationConfig, CumulativeConfig,
    StdDevMerge,
};
pub use dataset::{Row, TabularDataset};
pub use error::{Error, Result};
pub use events::{
    AnomalyBus, AnomalyEvent, AnomalyKind, AnomalySubscriber, DeliveryReport, LoggingSubscriber,
    RecordingSubscriber, Severity,
};
pub use moments::Moments;
pub use value::Value;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        classify_columns, AnalysisConfig, ColumnKind, Error, Result, TabularDataset, Value,
    };
}

//! # spc-stats
//!
//! Process-capability statistics for tabular process data.
//!
//! This crate re-exports the member crates:
//!
//! - [`spc_core`]: datasets, column classification, configuration, errors, anomaly bus
//! - [`spc_descriptive`]: count, mean, σ, min, max and median per column
//! - [`spc_correlation`]: Pearson matrix and significant pairs
//! - [`spc_histogram`]: fixed-bin-count histograms
//! - [`spc_capability`]: Cp, Cpk, Cpm, control limits and verdicts
//! - [`spc_cumulative`]: cross-upload statistics with trend-shift detection
//!
//! The session-scoped components are bundled by [`analyze`], which can also be
//! pushed onto the rayon pool with [`spawn_analysis`].
//!
//! ## Example
//!
//! ```rust
//! use spc_stats::{analyze, AnalysisConfig, TabularDataset, Value};
//!
//! let dataset = TabularDataset::from_columns(vec![
//!     ("A", vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]),
//!     ("B", vec![Value::from(2.0), Value::from(4.0), Value::from(6.0)]),
//! ])
//! .unwrap();
//!
//! let snapshot = analyze(&dataset, &AnalysisConfig::default()).unwrap();
//! assert_eq!(snapshot.correlation.significant.len(), 1);
//! ```

pub mod session;

pub use spc_capability;
pub use spc_core;
pub use spc_correlation;
pub use spc_cumulative;
pub use spc_descriptive;
pub use spc_histogram;

pub use session::{analyze, spawn_analysis, AnalysisSnapshot, InsufficientReason};

pub use spc_capability::{CapabilityAnalyzer, CapabilityClass, CapabilityOutcome, CapabilityReport, SpecLimits};
pub use spc_core::{
    AnalysisConfig, AnomalyBus, AnomalyEvent, AnomalySubscriber, ColumnClassification, Error, Result,
    TabularDataset, Value,
};
pub use spc_correlation::{CorrelationAnalysis, CorrelationEngine, CorrelationMatrix};
pub use spc_cumulative::{
    CumulativeAggregator, CumulativeParameterStatistic, CumulativeStore, InMemoryStore, MergeOutcome,
    StatisticKey,
};
pub use spc_descriptive::{describe, DescriptiveStatistics};
pub use spc_histogram::{FixedWidthBuilder, Histogram, HistogramBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        analyze, AnalysisConfig, CapabilityAnalyzer, CumulativeAggregator, Error, Result, SpecLimits,
        StatisticKey, TabularDataset, Value,
    };
}

//! Cumulative parameter statistics across uploads
//!
//! Every upload contributes one batch of measurements per numeric parameter.
//! The [`CumulativeAggregator`] folds each batch into a persistent record keyed
//! by `(parameter name, dataset type)`:
//!
//! - count, mean, min and max merge exactly
//! - σ pools both populations (or follows the latest batch, if configured)
//! - median and last value reflect the latest batch
//! - a sliding window keeps the most recent batch means
//!
//! Before merging, the batch mean is compared with the stored mean. A move of
//! more than 3σ raises a trend-shift [`spc_core::AnomalyEvent`] which is fanned
//! out on the [`spc_core::AnomalyBus`]. Notification never rolls back a merge.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spc_core::{AnomalyBus, CumulativeConfig};
//! use spc_cumulative::{CumulativeAggregator, InMemoryStore, StatisticKey};
//! use uuid::Uuid;
//!
//! let aggregator = CumulativeAggregator::new(
//!     Arc::new(InMemoryStore::new()),
//!     AnomalyBus::new(),
//!     CumulativeConfig::default(),
//! );
//! let key = StatisticKey::new("thickness", "coating");
//!
//! aggregator.merge_batch(&key, &[1.0, 2.0, 3.0], Uuid::new_v4()).unwrap();
//! let outcome = aggregator.merge_batch(&key, &[2.0, 2.5], Uuid::new_v4()).unwrap();
//! assert_eq!(outcome.statistic.count, 5);
//! ```

pub mod aggregator;
pub mod detector;
pub mod store;
pub mod types;

pub use aggregator::CumulativeAggregator;
pub use detector::{TrendShift, TrendShiftDetector};
pub use store::{CumulativeStore, InMemoryStore};
pub use types::{
    BatchSummary, CumulativeParameterStatistic, HistoricalValue, MergeOutcome, StatisticKey,
    TrackingState,
};

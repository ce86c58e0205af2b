//! Session-scoped analysis of one uploaded dataset

use serde::{Deserialize, Serialize};
use spc_core::{AnalysisConfig, ColumnClassification, ColumnClassifier, Result, TabularDataset};
use spc_correlation::{CorrelationAnalysis, CorrelationEngine};
use spc_descriptive::{describe_columns, ColumnStatistics};
use spc_histogram::{column_histograms, ColumnHistogram};
use tracing::{debug, instrument, warn};

/// Why a snapshot carries no statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsufficientReason {
    /// The dataset has no rows
    NoRows,
    /// No column classified as numeric
    NoNumericColumns,
}

impl std::fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsufficientReason::NoRows => write!(f, "dataset has no rows"),
            InsufficientReason::NoNumericColumns => write!(f, "dataset has no numeric columns"),
        }
    }
}

/// Everything the pure components derive from one dataset
///
/// Nothing here is persisted; the snapshot lives as long as the caller's
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub classification: ColumnClassification,
    /// One entry per numeric column with at least one finite value
    pub statistics: Vec<ColumnStatistics>,
    pub correlation: CorrelationAnalysis,
    pub histograms: Vec<ColumnHistogram>,
    /// Set when there was nothing to analyze
    pub insufficient_data: Option<InsufficientReason>,
}

impl AnalysisSnapshot {
    /// Check if the snapshot holds any statistics
    pub fn is_sufficient(&self) -> bool {
        self.insufficient_data.is_none()
    }

    /// Statistics for a column, if it was numeric and non-empty
    pub fn statistics_for(&self, column: &str) -> Option<&ColumnStatistics> {
        self.statistics.iter().find(|s| s.column == column)
    }

    /// Histogram for a column, if it was numeric
    pub fn histogram_for(&self, column: &str) -> Option<&ColumnHistogram> {
        self.histograms.iter().find(|h| h.column == column)
    }
}

/// Classify a dataset and run every session-scoped component over it
///
/// # Errors
///
/// Only fails when a classified column cannot be read back, which
/// indicates a malformed dataset.
#[instrument(skip_all, fields(rows = dataset.len(), columns = dataset.headers().len()))]
pub fn analyze(dataset: &TabularDataset, config: &AnalysisConfig) -> Result<AnalysisSnapshot> {
    let classification = ColumnClassifier::new(config.classifier).classify(dataset);
    debug!(
        numeric = classification.numeric.len(),
        categorical = classification.categorical.len(),
        "Classified columns"
    );

    let insufficient_data = if dataset.is_empty() {
        Some(InsufficientReason::NoRows)
    } else if classification.numeric.is_empty() {
        Some(InsufficientReason::NoNumericColumns)
    } else {
        None
    };
    if let Some(reason) = insufficient_data {
        warn!(%reason, "Nothing to analyze");
    }

    let statistics = describe_columns(dataset, &classification.numeric)?;
    let correlation = CorrelationEngine::new(config.correlation).analyze_dataset(dataset, &classification.numeric)?;
    let histograms = column_histograms(dataset, &classification.numeric, config.bin_count)?;

    Ok(AnalysisSnapshot {
        classification,
        statistics,
        correlation,
        histograms,
        insufficient_data,
    })
}

/// Run [`analyze`] on the rayon pool and hand the result to `callback`
///
/// Returns immediately. The dataset is moved onto the worker so the caller's
/// thread is never blocked by a large upload.
pub fn spawn_analysis<F>(dataset: TabularDataset, config: AnalysisConfig, callback: F)
where
    F: FnOnce(Result<AnalysisSnapshot>) + Send + 'static,
{
    rayon::spawn(move || callback(analyze(&dataset, &config)));
}

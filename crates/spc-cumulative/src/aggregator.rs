//! Merges uploaded batches into persistent per-parameter statistics

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use spc_core::config::{CumulativeConfig, StdDevMerge};
use spc_core::{AnomalyBus, AnomalyEvent, AnomalyKind, Result, TabularDataset};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::detector::{TrendShift, TrendShiftDetector};
use crate::store::CumulativeStore;
use crate::types::{
    BatchSummary, CumulativeParameterStatistic, HistoricalValue, MergeOutcome, StatisticKey,
    TrackingState,
};

/// Stateful cross-upload aggregator
///
/// Each [`StatisticKey`] moves from `Uninitialized` to `Tracking` on its first
/// batch and stays there. Merges on the same key are serialised through a
/// per-key lock, so concurrent uploads never lose an update. Merges on
/// different keys proceed in parallel.
pub struct CumulativeAggregator<S: CumulativeStore> {
    store: Arc<S>,
    bus: AnomalyBus,
    config: CumulativeConfig,
    detector: TrendShiftDetector,
    locks: DashMap<StatisticKey, Arc<Mutex<()>>>,
}

impl<S: CumulativeStore> CumulativeAggregator<S> {
    /// Create an aggregator over a store and an anomaly bus
    pub fn new(store: Arc<S>, bus: AnomalyBus, config: CumulativeConfig) -> Self {
        Self {
            store,
            bus,
            detector: TrendShiftDetector::from_config(&config),
            config,
            locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn bus(&self) -> &AnomalyBus {
        &self.bus
    }

    pub fn config(&self) -> &CumulativeConfig {
        &self.config
    }

    /// Number of keys with a merge in flight
    pub fn locked_keys(&self) -> usize {
        self.locks.len()
    }

    /// Current state of a key
    pub fn state(&self, key: &StatisticKey) -> Result<TrackingState> {
        Ok(match self.store.load(key)? {
            Some(_) => TrackingState::Tracking,
            None => TrackingState::Uninitialized,
        })
    }

    /// Current record of a key
    pub fn statistic(&self, key: &StatisticKey) -> Result<Option<CumulativeParameterStatistic>> {
        self.store.load(key)
    }

    fn key_lock(&self, key: &StatisticKey) -> Arc<Mutex<()>> {
        // Clone the handle so the map shard is released before locking
        Arc::clone(self.locks.entry(key.clone()).or_default().value())
    }

    /// Drop a key's lock entry once no other merge holds or waits on it
    fn release_key_lock(&self, key: &StatisticKey, lock: Arc<Mutex<()>>) {
        drop(lock);
        // remove_if runs under the shard lock, so no key_lock clone can race it
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Merge one batch of measurements, timestamped now
    pub fn merge_batch(&self, key: &StatisticKey, values: &[f64], upload_id: Uuid) -> Result<MergeOutcome> {
        self.merge_batch_at(key, values, upload_id, Utc::now())
    }

    /// Merge one batch of measurements into the record for `key`
    ///
    /// An empty batch (after dropping non-finite values) is rejected before
    /// any state is read or written. A store failure on save is logged and
    /// reported through [`MergeOutcome::persisted`]; subscribers are still
    /// notified of any anomaly.
    ///
    /// # Errors
    ///
    /// [`spc_core::Error::InsufficientData`] for an empty batch, or the store's error
    /// when the prior record cannot be loaded.
    #[instrument(skip(self, values), fields(parameter = %key.parameter_name, dataset_type = %key.dataset_type, batch_len = values.len()))]
    pub fn merge_batch_at(
        &self,
        key: &StatisticKey,
        values: &[f64],
        upload_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Result<MergeOutcome> {
        let batch = BatchSummary::from_values(values)?;

        let lock = self.key_lock(key);
        let merged = {
            let _guard = lock.lock();
            self.store.load(key).map(|prior| {
                let previous_state = if prior.is_some() {
                    TrackingState::Tracking
                } else {
                    TrackingState::Uninitialized
                };
                let (statistic, shift) = match prior {
                    None => (self.seed(key, &batch, upload_id, timestamp), None),
                    Some(prior) => self.fold(prior, &batch, upload_id, timestamp),
                };

                let persisted = match self.store.save(&statistic) {
                    Ok(()) => true,
                    Err(e) => {
                        error!(error = %e, "Failed to persist cumulative statistic");
                        false
                    }
                };
                (previous_state, statistic, shift, persisted)
            })
        };
        self.release_key_lock(key, lock);
        let (previous_state, statistic, shift, persisted) = merged?;

        debug!(
            count = statistic.count,
            mean = statistic.mean,
            std_dev = statistic.std_dev,
            ?previous_state,
            "Merged batch"
        );

        let anomaly = shift.map(|shift| self.event(key, shift, upload_id, timestamp));
        let delivery = anomaly.as_ref().map(|event| {
            info!(severity = %event.severity, sigma_distance = event.sigma_distance, "Trend shift detected");
            let report = self.bus.publish(event);
            if !report.is_complete() {
                warn!(failed = report.failures.len(), "Some anomaly subscribers failed");
            }
            report
        });

        Ok(MergeOutcome {
            previous_state,
            statistic,
            anomaly,
            persisted,
            delivery,
        })
    }

    /// Merge every listed numeric column of a dataset under one dataset type
    ///
    /// Columns without any numeric value are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first column whose merge fails.
    pub fn merge_dataset(
        &self,
        dataset: &TabularDataset,
        dataset_type: &str,
        columns: &[String],
        upload_id: Uuid,
    ) -> Result<Vec<MergeOutcome>> {
        let timestamp = Utc::now();
        let mut outcomes = Vec::with_capacity(columns.len());
        for column in columns {
            let values = dataset.numeric_values(column)?;
            if values.is_empty() {
                debug!(column = %column, "Skipping column without numeric values");
                continue;
            }
            let key = StatisticKey::new(column.as_str(), dataset_type);
            outcomes.push(self.merge_batch_at(&key, &values, upload_id, timestamp)?);
        }
        Ok(outcomes)
    }

    fn seed(
        &self,
        key: &StatisticKey,
        batch: &BatchSummary,
        upload_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> CumulativeParameterStatistic {
        let mut historical_values = VecDeque::with_capacity(self.config.history_capacity.min(64));
        if self.config.history_capacity > 0 {
            historical_values.push_back(HistoricalValue {
                timestamp,
                value: batch.mean(),
                upload_id,
            });
        }

        CumulativeParameterStatistic {
            key: key.clone(),
            count: batch.count(),
            mean: batch.mean(),
            std_dev: batch.std_dev(),
            sum_sq_dev: batch.moments.m2,
            min: batch.moments.min,
            max: batch.moments.max,
            median: batch.median,
            last_value: batch.last_value,
            historical_values,
            anomaly_detected: false,
            anomaly_details: None,
            last_updated: timestamp,
        }
    }

    fn fold(
        &self,
        mut statistic: CumulativeParameterStatistic,
        batch: &BatchSummary,
        upload_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> (CumulativeParameterStatistic, Option<TrendShift>) {
        let shift = self.detector.detect(&statistic, batch);
        let merged = statistic.moments().merge(&batch.moments);

        let (std_dev, sum_sq_dev) = match self.config.std_dev_merge {
            StdDevMerge::Pooled => (merged.population_std_dev(), merged.m2),
            StdDevMerge::LatestBatch => {
                let sd = batch.std_dev();
                (sd, sd * sd * merged.count as f64)
            }
        };

        statistic.count = merged.count;
        statistic.mean = merged.mean;
        statistic.std_dev = std_dev;
        statistic.sum_sq_dev = sum_sq_dev;
        statistic.min = merged.min;
        statistic.max = merged.max;
        statistic.median = batch.median;
        statistic.last_value = batch.last_value;
        statistic.last_updated = timestamp;

        statistic.historical_values.push_back(HistoricalValue {
            timestamp,
            value: batch.mean(),
            upload_id,
        });
        while statistic.historical_values.len() > self.config.history_capacity {
            statistic.historical_values.pop_front();
        }

        statistic.anomaly_detected = shift.is_some();
        statistic.anomaly_details = shift.as_ref().map(|s| s.message.clone());

        (statistic, shift)
    }

    fn event(&self, key: &StatisticKey, shift: TrendShift, upload_id: Uuid, timestamp: DateTime<Utc>) -> AnomalyEvent {
        AnomalyEvent {
            parameter_name: key.parameter_name.clone(),
            dataset_type: key.dataset_type.clone(),
            kind: AnomalyKind::TrendShift,
            severity: shift.severity,
            message: shift.message,
            triggering_upload_id: upload_id,
            timestamp,
            prior_mean: shift.prior_mean,
            batch_mean: shift.batch_mean,
            sigma_distance: shift.sigma_distance,
        }
    }
}

impl<S: CumulativeStore> std::fmt::Debug for CumulativeAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CumulativeAggregator")
            .field("config", &self.config)
            .field("subscribers", &self.bus.subscriber_count())
            .field("locked_keys", &self.locked_keys())
            .finish()
    }
}

//! Shared utilities for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use spc_core::{AnomalyBus, AnomalyEvent, AnomalySubscriber, CumulativeConfig, Error, Result};
use spc_cumulative::{
    CumulativeAggregator, CumulativeParameterStatistic, CumulativeStore, InMemoryStore, StatisticKey,
};

pub fn key() -> StatisticKey {
    StatisticKey::new("thickness", "coating")
}

pub fn aggregator() -> CumulativeAggregator<InMemoryStore> {
    CumulativeAggregator::new(Arc::new(InMemoryStore::new()), AnomalyBus::new(), CumulativeConfig::default())
}

/// Aggregator whose key already tracks n=10, mean=100, σ=5
pub fn seeded_aggregator() -> CumulativeAggregator<InMemoryStore> {
    let agg = aggregator();
    agg.store()
        .save(&CumulativeParameterStatistic::from_summary(key(), 10, 100.0, 5.0, 90.0, 110.0))
        .unwrap();
    agg
}

/// Store that loads nothing and refuses every save
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    inner: InMemoryStore,
}

impl ReadOnlyStore {
    pub fn with_record(statistic: CumulativeParameterStatistic) -> Self {
        let inner = InMemoryStore::new();
        inner.save(&statistic).unwrap();
        Self { inner }
    }
}

impl CumulativeStore for ReadOnlyStore {
    fn load(&self, key: &StatisticKey) -> Result<Option<CumulativeParameterStatistic>> {
        self.inner.load(key)
    }

    fn save(&self, _statistic: &CumulativeParameterStatistic) -> Result<()> {
        Err(Error::Persistence("store is read-only".to_string()))
    }

    fn keys(&self) -> Result<Vec<StatisticKey>> {
        self.inner.keys()
    }
}

/// Store whose reads always fail
#[derive(Debug, Default)]
pub struct UnreachableStore;

impl CumulativeStore for UnreachableStore {
    fn load(&self, _key: &StatisticKey) -> Result<Option<CumulativeParameterStatistic>> {
        Err(Error::Persistence("connection refused".to_string()))
    }

    fn save(&self, _statistic: &CumulativeParameterStatistic) -> Result<()> {
        Err(Error::Persistence("connection refused".to_string()))
    }

    fn keys(&self) -> Result<Vec<StatisticKey>> {
        Err(Error::Persistence("connection refused".to_string()))
    }
}

/// Subscriber that rejects every event
#[derive(Debug, Default)]
pub struct BrokenSubscriber;

impl AnomalySubscriber for BrokenSubscriber {
    fn deliver(&self, _event: &AnomalyEvent) -> Result<()> {
        Err(Error::Notification("mail relay down".to_string()))
    }

    fn name(&self) -> &str {
        "mail"
    }
}

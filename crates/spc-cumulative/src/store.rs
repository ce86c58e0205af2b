//! Persistence seam for cumulative statistics

use dashmap::DashMap;
use spc_core::Result;

use crate::types::{CumulativeParameterStatistic, StatisticKey};

/// Keyed storage of cumulative statistics
///
/// Implementations must be safe to share across threads. The aggregator
/// serialises read-modify-write cycles per key, so a store only needs
/// atomic single-record load and save.
pub trait CumulativeStore: Send + Sync {
    /// Load the record for a key, `None` when the key was never tracked
    fn load(&self, key: &StatisticKey) -> Result<Option<CumulativeParameterStatistic>>;

    /// Insert or replace the record under its own key
    fn save(&self, statistic: &CumulativeParameterStatistic) -> Result<()>;

    /// Every tracked key
    fn keys(&self) -> Result<Vec<StatisticKey>>;
}

/// Process-local store backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<StatisticKey, CumulativeParameterStatistic>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CumulativeStore for InMemoryStore {
    fn load(&self, key: &StatisticKey) -> Result<Option<CumulativeParameterStatistic>> {
        Ok(self.records.get(key).map(|record| record.value().clone()))
    }

    fn save(&self, statistic: &CumulativeParameterStatistic) -> Result<()> {
        self.records.insert(statistic.key.clone(), statistic.clone());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<StatisticKey>> {
        let mut keys: Vec<StatisticKey> = self.records.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parameter: &str) -> CumulativeParameterStatistic {
        CumulativeParameterStatistic::from_summary(StatisticKey::new(parameter, "line-a"), 4, 2.0, 1.0, 0.5, 3.5)
    }

    #[test]
    fn test_save_and_load() {
        let store = InMemoryStore::new();
        let key = StatisticKey::new("pressure", "line-a");
        assert!(store.load(&key).unwrap().is_none());

        store.save(&record("pressure")).unwrap();
        let loaded = store.load(&key).unwrap().unwrap();
        assert_eq!(loaded.count, 4);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_replaces() {
        let store = InMemoryStore::new();
        let mut stat = record("pressure");
        store.save(&stat).unwrap();
        stat.count = 9;
        store.save(&stat).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&stat.key).unwrap().unwrap().count, 9);
    }

    #[test]
    fn test_keys_sorted() {
        let store = InMemoryStore::new();
        store.save(&record("b")).unwrap();
        store.save(&record("a")).unwrap();
        let names: Vec<_> = store.keys().unwrap().into_iter().map(|k| k.parameter_name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}

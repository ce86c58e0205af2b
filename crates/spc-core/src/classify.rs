//! Column classification
//!
//! Partitions dataset columns into numeric, categorical and unclassified
//! columns. Unclassified columns stay in the raw data but are excluded from
//! both lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::TabularDataset;

/// Kind assigned to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Unclassified,
}

/// Classification of a single column with the ratios that decided it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Parseable-as-number cells over non-null cells
    pub numeric_ratio: f64,
    /// Distinct non-null cells over non-null cells
    pub unique_ratio: f64,
    pub non_null_count: usize,
}

/// Result of classifying every column of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnClassification {
    /// Numeric column names in header order
    pub numeric: Vec<String>,
    /// Categorical column names in header order
    pub categorical: Vec<String>,
    /// One profile per header, in header order
    pub profiles: Vec<ColumnProfile>,
}

impl ColumnClassification {
    /// Look up the kind assigned to a column
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.profiles.iter().find(|p| p.name == name).map(|p| p.kind)
    }

    /// Check if no column was classified as numeric or categorical
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.categorical.is_empty()
    }
}

/// Column classifier with configurable thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnClassifier {
    config: ClassifierConfig,
}

impl ColumnClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Profile a single column
    pub fn profile(&self, dataset: &TabularDataset, name: &str) -> ColumnProfile {
        let mut non_null = 0usize;
        let mut numeric = 0usize;
        let mut distinct = HashSet::new();

        for value in dataset.column(name) {
            let Some(key) = value.distinct_key() else {
                continue;
            };
            non_null += 1;
            if value.as_number().is_some() {
                numeric += 1;
            }
            distinct.insert(key);
        }

        let (numeric_ratio, unique_ratio) = if non_null == 0 {
            (0.0, 1.0)
        } else {
            (
                numeric as f64 / non_null as f64,
                distinct.len() as f64 / non_null as f64,
            )
        };

        let kind = if non_null == 0 {
            ColumnKind::Unclassified
        } else if numeric_ratio > self.config.numeric_ratio {
            ColumnKind::Numeric
        } else if unique_ratio < self.config.unique_ratio {
            ColumnKind::Categorical
        } else {
            ColumnKind::Unclassified
        };

        ColumnProfile {
            name: name.to_string(),
            kind,
            numeric_ratio,
            unique_ratio,
            non_null_count: non_null,
        }
    }

    /// Classify every column of the dataset
    ///
    /// An empty dataset yields empty lists.
    pub fn classify(&self, dataset: &TabularDataset) -> ColumnClassification {
        let mut result = ColumnClassification::default();
        if dataset.is_empty() {
            return result;
        }

        for name in dataset.headers() {
            let profile = self.profile(dataset, name);
            match profile.kind {
                ColumnKind::Numeric => result.numeric.push(name.clone()),
                ColumnKind::Categorical => result.categorical.push(name.clone()),
                ColumnKind::Unclassified => {}
            }
            result.profiles.push(profile);
        }

        tracing::debug!(
            numeric = result.numeric.len(),
            categorical = result.categorical.len(),
            columns = dataset.headers().len(),
            "Classified dataset columns"
        );
        result
    }
}

/// Classify columns using the default thresholds
pub fn classify_columns(dataset: &TabularDataset) -> ColumnClassification {
    ColumnClassifier::default().classify(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn text(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_numeric_column() {
        let ds = TabularDataset::from_columns(vec![("temp", vec![1.0, 2.0, 3.0, 4.0, 5.0])]).unwrap();
        let c = classify_columns(&ds);
        assert_eq!(c.numeric, vec!["temp".to_string()]);
        assert!(c.categorical.is_empty());
    }

    #[test]
    fn test_numeric_text_counts_as_numeric() {
        let ds = TabularDataset::from_columns(vec![(
            "weight",
            text(&["1.5", "2.0", "3", "4.25", "5", "6", "7", "8", "9", "x"]),
        )])
        .unwrap();
        // 9/10 parse, which is above 0.8
        assert_eq!(classify_columns(&ds).kind_of("weight"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_numeric_ratio_boundary_is_exclusive() {
        // Exactly 0.8 parseable is not enough; 5 distinct out of 5 is not categorical either
        let ds = TabularDataset::from_columns(vec![("mix", text(&["1", "2", "3", "4", "x"]))]).unwrap();
        assert_eq!(classify_columns(&ds).kind_of("mix"), Some(ColumnKind::Unclassified));
    }

    #[test]
    fn test_categorical_column() {
        let ds = TabularDataset::from_columns(vec![(
            "line",
            text(&["A", "B", "A", "A", "B", "A"]),
        )])
        .unwrap();
        let c = classify_columns(&ds);
        assert_eq!(c.categorical, vec!["line".to_string()]);
        assert_eq!(c.kind_of("line"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_unclassified_column() {
        let ds = TabularDataset::from_columns(vec![("note", text(&["a", "b", "c", "d"]))]).unwrap();
        let c = classify_columns(&ds);
        assert!(c.numeric.is_empty());
        assert!(c.categorical.is_empty());
        assert_eq!(c.kind_of("note"), Some(ColumnKind::Unclassified));
    }

    #[test]
    fn test_nulls_ignored_in_ratios() {
        let ds = TabularDataset::from_columns(vec![(
            "v",
            vec![Value::from(1.0), Value::Null, Value::Null, Value::from(2.0)],
        )])
        .unwrap();
        let profile = ColumnClassifier::default().profile(&ds, "v");
        assert_eq!(profile.non_null_count, 2);
        assert_eq!(profile.numeric_ratio, 1.0);
        assert_eq!(profile.kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_all_null_column_is_unclassified() {
        let ds = TabularDataset::from_columns(vec![
            ("v", vec![Value::from(1.0), Value::from(2.0)]),
            ("empty", vec![Value::Null, Value::Null]),
        ])
        .unwrap();
        assert_eq!(classify_columns(&ds).kind_of("empty"), Some(ColumnKind::Unclassified));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = TabularDataset::new(["a", "b"]).unwrap();
        let c = classify_columns(&ds);
        assert!(c.is_empty());
        assert!(c.profiles.is_empty());
    }
}

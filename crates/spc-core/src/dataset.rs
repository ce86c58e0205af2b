//! Tabular dataset representation
//!
//! The ingestion layer hands the engine an ordered header list and a sequence
//! of rows. Only the shape matters here; parsing happens upstream.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Value};

/// One row of a dataset, keyed by column header
pub type Row = HashMap<String, Value>;

/// Ordered headers plus rows of tagged values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularDataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl TabularDataset {
    /// Create an empty dataset with the given headers
    ///
    /// Headers must be unique.
    pub fn new<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(headers.len());
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(Error::duplicate_header(name));
            }
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Create a dataset from headers and rows
    pub fn with_rows<I, S>(headers: I, rows: Vec<Row>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new(headers)?;
        dataset.rows = rows;
        Ok(dataset)
    }

    /// Build a dataset from column vectors of equal or unequal length
    ///
    /// Shorter columns are padded with nulls.
    pub fn from_columns<S, V>(columns: Vec<(S, Vec<V>)>) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let columns: Vec<(String, Vec<Value>)> = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
            .collect();
        let mut dataset = Self::new(columns.iter().map(|(name, _)| name.clone()))?;
        let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        dataset.rows = (0..height)
            .map(|i| {
                columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Ok(dataset)
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the headers in upload order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Iterate the cells of a column in row order; missing cells read as null
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        const NULL: &Value = &Value::Null;
        self.rows.iter().map(move |row| row.get(name).unwrap_or(NULL))
    }

    /// Extract the parseable numbers of a column in row order
    ///
    /// Null and non-numeric cells are skipped. Returns an error when the
    /// column does not exist.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        if !self.has_column(name) {
            return Err(Error::missing_column(name));
        }
        Ok(self.column(name).filter_map(Value::as_number).collect())
    }

    /// Extract the parseable numbers of a column restricted to a row subset
    ///
    /// Out-of-range row indices are ignored.
    pub fn numeric_values_in_rows(&self, name: &str, rows: &[usize]) -> Result<Vec<f64>> {
        if !self.has_column(name) {
            return Err(Error::missing_column(name));
        }
        Ok(rows
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .filter_map(|row| row.get(name).and_then(Value::as_number))
            .collect())
    }
}

//! Tagged cell values
//!
//! Uploaded rows arrive loosely typed. Each cell is normalised into one of
//! three variants so classification does not depend on runtime type probing.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A single cell of a tabular dataset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric cell
    Number(f64),
    /// Free text, which may still hold a parseable number ("12.5")
    Text(String),
    /// Empty cell
    #[default]
    Null,
}

impl Value {
    /// Check if the cell is empty
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interpret the cell as a finite number
    ///
    /// Text cells are trimmed and parsed; NaN and infinities are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Null => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Key used for distinct-value counting
    pub(crate) fn distinct_key(&self) -> Option<DistinctKey<'_>> {
        match self {
            Value::Number(n) => Some(DistinctKey::Number(OrderedFloat(*n))),
            Value::Text(s) => Some(DistinctKey::Text(s.as_str())),
            Value::Null => None,
        }
    }
}

/// Hashable view of a non-null cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DistinctKey<'a> {
    Number(OrderedFloat<f64>),
    Text(&'a str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

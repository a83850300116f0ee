// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular input data.
//!
//! The engine consumes a pre-aggregated row set; it does not own data loading
//! or transformation (the two exceptions, pie's occurrence counting and
//! histogram binning, live in the respective mark renderers).

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// A single cell value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A finite or non-finite number.
    Number(f64),
    /// A string.
    Text(String),
    /// Seconds since the Unix epoch.
    Timestamp(f64),
    /// A boolean.
    Bool(bool),
    /// Missing.
    Null,
}

impl Value {
    /// Returns the numeric view of the value, if it has one.
    ///
    /// Non-finite numbers yield `None`, so scale positions computed from the
    /// result can never be NaN. Text is not parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Timestamp(v) => v.is_finite().then_some(*v),
            Self::Text(_) | Self::Bool(_) | Self::Null => None,
        }
    }

    /// Returns the categorical key for the value.
    ///
    /// Null and empty text map to the literal `"None"`, which is also what
    /// categorical axes display.
    pub fn category(&self) -> String {
        match self {
            Self::Text(s) if !s.is_empty() => s.clone(),
            Self::Text(_) | Self::Null => String::from("None"),
            Self::Number(v) | Self::Timestamp(v) => crate::format::format_number(*v),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Whether the value is null or empty text.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Null) || matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(String::from(v))
    }
}

/// One row: an ordered field name → value record.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping insertion order.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// Looks a field up by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(name, value)| (name == field).then_some(value))
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// An ordered sequence of rows.
///
/// Row order is significant: series and stack order follow it, and legends
/// list entries in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSet {
    rows: Vec<Row>,
}

impl DataSet {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from rows.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The distinct categorical keys of `field`, in first-seen order.
    pub fn categories(&self, field: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Some(value) = row.get(field) {
                let key = value.category();
                if !out.contains(&key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// The finite numeric extent of `field`, if any value is numeric.
    pub fn numeric_extent(&self, field: &str) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for row in &self.rows {
            if let Some(v) = row.get(field).and_then(Value::as_f64) {
                extent = Some(match extent {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        extent
    }
}

/// Per-column semantic metadata (the host's table properties).
///
/// When present, tick and tooltip formatting defer to it instead of the
/// generic formatters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMeta {
    /// The field this metadata describes.
    pub field: String,
    /// The column's semantic type.
    pub field_type: crate::config::FieldType,
    /// Optional unit suffix appended to formatted numbers (e.g. `"ms"`).
    pub unit: Option<String>,
}

/// A lookup table of [`ColumnMeta`] by field name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnTable {
    columns: Vec<ColumnMeta>,
}

impl ColumnTable {
    /// Builds a table from column entries.
    pub fn new(columns: impl IntoIterator<Item = ColumnMeta>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Looks up metadata for `field`.
    pub fn get(&self, field: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.field == field)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn category_substitutes_none_for_missing() {
        assert_eq!(Value::Null.category(), "None");
        assert_eq!(Value::Text(String::new()).category(), "None");
        assert_eq!(Value::from("west").category(), "west");
    }

    #[test]
    fn as_f64_rejects_non_finite_and_text() {
        assert_eq!(Value::Number(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Number(f64::NAN).as_f64(), None);
        assert_eq!(Value::from("3.5").as_f64(), None);
    }

    #[test]
    fn categories_preserve_first_seen_order() {
        let data = DataSet::from_rows([
            Row::new().with("r", "b"),
            Row::new().with("r", "a"),
            Row::new().with("r", "b"),
        ]);
        assert_eq!(data.categories("r"), ["b", "a"]);
    }

    #[test]
    fn numeric_extent_skips_non_finite() {
        let data = DataSet::from_rows([
            Row::new().with("v", 3.0),
            Row::new().with("v", f64::NAN),
            Row::new().with("v", -1.0),
        ]);
        assert_eq!(data.numeric_extent("v"), Some((-1.0, 3.0)));
    }
}

//! Row — ordered column → value mapping.
//!
//! A `Row` preserves the source column order and keeps keys unique. Values
//! are optional so NULLs read back from outer joins stay representable;
//! CSV-sourced rows always carry `Some`.

use crate::error::{CsvRelError, CsvRelResult};
use crate::schema::ColumnType;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// An ordered mapping of column name to string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Option<String>>,
}

impl Row {
    /// Build a row from (column, value) pairs, preserving order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Row {
            columns: Vec::new(),
            values: Vec::new(),
        };
        for (k, v) in pairs {
            row.columns.push(k.into());
            row.values.push(Some(v.into()));
        }
        row
    }

    /// Build a row where some values may be NULL (query results).
    pub fn from_nullable_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut row = Row {
            columns: Vec::new(),
            values: Vec::new(),
        };
        for (k, v) in pairs {
            row.columns.push(k.into());
            row.values.push(v);
        }
        row
    }

    /// Value of a column, or `None` when the column is absent or NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values[i].as_deref())
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in source order.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate (column, value) pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Option::as_deref))
    }

    /// Explicit field-level edit. Returns false when the column is absent.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.columns.iter().position(|c| c == column) {
            Some(i) => {
                self.values[i] = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Convert the row into a JSON object, detecting numeric cells so that
    /// `"1"` becomes `1` and blank cells become `null`.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::with_capacity(self.columns.len());
        for (col, val) in self.iter() {
            obj.insert(col.to_string(), cell_to_json(val));
        }
        Value::Object(obj)
    }

    /// Decode the row into a declared field list via serde.
    ///
    /// Cells are lifted to JSON scalars first (integer and float parses are
    /// attempted explicitly), so numeric struct fields decode from numeric
    /// text. Missing or unconvertible fields fail with a typed error.
    pub fn decode<T: DeserializeOwned>(&self) -> CsvRelResult<T> {
        serde_json::from_value(self.to_json()).map_err(|e| CsvRelError::RowDecode {
            target: std::any::type_name::<T>().to_string(),
            message: e.to_string(),
        })
    }
}

fn cell_to_json(value: Option<&str>) -> Value {
    let Some(text) = value else {
        return Value::Null;
    };
    match crate::schema::detect_cell(text) {
        ColumnType::Unknown => Value::Null,
        ColumnType::Integer => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(text)),
        ColumnType::Double => text
            .trim()
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(text)),
        ColumnType::String => Value::from(text),
    }
}

/// Convert a slice of rows into JSON objects (for the sink module).
pub fn rows_to_json(rows: &[Row]) -> Vec<Value> {
    rows.iter().map(Row::to_json).collect()
}

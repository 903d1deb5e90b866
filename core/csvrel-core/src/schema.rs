//! Schema inference over un-typed tabular rows.
//!
//! Each column's type is folded across a sample of rows through a monotonic
//! merge lattice: `Unknown < Integer < Double < String`. Adding more sampled
//! rows can only widen a column's type, never narrow it.

use crate::error::{CsvRelError, CsvRelResult};
use crate::row::Row;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Inferred type of a column.
///
/// The derived `Ord` is the merge lattice order; `merge` is `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnType {
    Unknown,
    Integer,
    Double,
    String,
}

impl ColumnType {
    /// Widen `self` by `other`: the greater of the two under the lattice order.
    pub fn merge(self, other: ColumnType) -> ColumnType {
        self.max(other)
    }

    /// Lattice name, as reported in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Unknown => "UNKNOWN",
            ColumnType::Integer => "INTEGER",
            ColumnType::Double => "DOUBLE",
            ColumnType::String => "STRING",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the type of a single cell.
///
/// Blank cells are `Unknown` and never widen a column. Otherwise an integer
/// parse is attempted, then a float parse, else the cell is `String`.
pub fn detect_cell(value: &str) -> ColumnType {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ColumnType::Unknown;
    }
    if trimmed.parse::<i64>().is_ok() {
        return ColumnType::Integer;
    }
    if trimmed.parse::<f64>().is_ok() {
        return ColumnType::Double;
    }
    ColumnType::String
}

/// Ordered column → type mapping produced by inference or introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    entries: Vec<(String, ColumnType)>,
}

impl Schema {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, ColumnType)>,
        K: Into<String>,
    {
        Schema {
            entries: pairs.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    /// Type of a column, by exact name.
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, t)| *t)
    }

    /// (column, type) pairs in first-seen column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }
}

/// Infer a schema from at most `sample_size` rows.
///
/// Column order follows the first row's column order. Fails when the source
/// has zero header columns.
pub fn infer_schema(rows: &[Row], sample_size: usize) -> CsvRelResult<Schema> {
    let headers: Vec<String> = match rows.first() {
        Some(first) => first.columns().to_vec(),
        None => Vec::new(),
    };
    infer_schema_from(&headers, rows, sample_size)
}

/// Infer a schema for a known header list.
///
/// Used when the header row exists independently of the data rows (a source
/// with headers but zero records still has a schema — all `Unknown`).
pub fn infer_schema_from(
    headers: &[String],
    rows: &[Row],
    sample_size: usize,
) -> CsvRelResult<Schema> {
    if headers.is_empty() {
        return Err(CsvRelError::Schema(
            "no header columns in source".to_string(),
        ));
    }

    let mut types = vec![ColumnType::Unknown; headers.len()];
    for row in rows.iter().take(sample_size) {
        for (i, header) in headers.iter().enumerate() {
            let detected = match row.get(header) {
                Some(value) => detect_cell(value),
                None => ColumnType::Unknown,
            };
            types[i] = types[i].merge(detected);
        }
    }

    debug!(
        columns = headers.len(),
        sampled = rows.len().min(sample_size),
        "schema inferred"
    );
    Ok(Schema::from_pairs(
        headers.iter().map(String::as_str).zip(types),
    ))
}

/// Check that every required column is present in `headers`.
///
/// Fails with the first missing column's name.
pub fn check_required_columns(headers: &[String], required: &[&str]) -> CsvRelResult<()> {
    for col in required {
        if !headers.iter().any(|h| h == col) {
            return Err(CsvRelError::MissingColumn {
                column: (*col).to_string(),
            });
        }
    }
    Ok(())
}

/// Compare an inferred schema against an expected one.
///
/// Expected-driven: every expected column must be present with a type whose
/// name matches case-insensitively. Reports the first mismatch through the
/// log and returns `false` instead of erroring — validation is a routine
/// branch point, not an exceptional path.
pub fn validate_against_schema(actual: &Schema, expected: &Schema) -> bool {
    for (column, expected_type) in expected.iter() {
        let actual_name = actual.get(column).map(|t| t.name()).unwrap_or("MISSING");
        if !actual_name.eq_ignore_ascii_case(expected_type.name()) {
            error!(
                column,
                expected = expected_type.name(),
                actual = actual_name,
                "schema mismatch"
            );
            return false;
        }
    }
    debug!("schema validation passed");
    true
}

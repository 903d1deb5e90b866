//! Tabular sources — a CSV file as a named relation-to-be.
//!
//! `CsvSource` is an immutable reference to a file plus a relation name
//! (derived from the file stem unless supplied). `CsvView` is the in-memory
//! processing handle: rows are parsed lazily, cached for the view's
//! lifetime, and only mutated by explicit field-level edits.

use crate::backend::Backend;
use crate::error::{CsvRelError, CsvRelResult};
use crate::relation::Relation;
use crate::row::Row;
use crate::schema::{self, Schema};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A reference to an external tabular file plus its relation name.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    /// Relation name defaults to the file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table".to_string());
        CsvSource { path, name }
    }

    pub fn from_path_named(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        CsvSource {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// In-memory processing handle over this file.
    pub fn view(&self) -> CsvView {
        CsvView {
            path: self.path.clone(),
            cached: None,
        }
    }

    /// Parse the file and bulk-load it as a relation on `backend`.
    pub fn load_to(&self, backend: &Arc<dyn Backend>) -> CsvRelResult<Relation> {
        let (_, rows) = read_csv(&self.path)?;
        crate::load::load(&rows, &self.name, backend)
    }
}

/// Parse a CSV file into its header list and rows.
pub fn read_csv(path: &Path) -> CsvRelResult<(Vec<String>, Vec<Row>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(Row::from_pairs(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string)),
        ));
    }
    Ok((headers, rows))
}

/// In-memory view over a CSV file, with lazily cached rows.
#[derive(Debug)]
pub struct CsvView {
    path: PathBuf,
    cached: Option<(Vec<String>, Vec<Row>)>,
}

impl CsvView {
    fn load(&mut self) -> CsvRelResult<&mut (Vec<String>, Vec<Row>)> {
        match &mut self.cached {
            Some(cached) => Ok(cached),
            cached @ None => Ok(cached.insert(read_csv(&self.path)?)),
        }
    }

    /// All rows, parsed on first access.
    pub fn rows(&mut self) -> CsvRelResult<&[Row]> {
        Ok(&self.load()?.1)
    }

    /// Header columns in file order.
    pub fn headers(&mut self) -> CsvRelResult<Vec<String>> {
        Ok(self.load()?.0.clone())
    }

    /// First `n` rows.
    pub fn limit(&mut self, n: usize) -> CsvRelResult<Vec<Row>> {
        Ok(self.rows()?.iter().take(n).cloned().collect())
    }

    /// Rows after the first `n`.
    pub fn skip(&mut self, n: usize) -> CsvRelResult<Vec<Row>> {
        Ok(self.rows()?.iter().skip(n).cloned().collect())
    }

    /// Log the first `n` rows for inspection.
    pub fn peek(&mut self, n: usize) -> CsvRelResult<()> {
        for row in self.rows()?.iter().take(n) {
            info!(?row, "peek");
        }
        Ok(())
    }

    /// Decode every row into a declared field list.
    pub fn decode_all<T: DeserializeOwned>(&mut self) -> CsvRelResult<Vec<T>> {
        self.rows()?.iter().map(Row::decode).collect()
    }

    /// Infer the per-column schema from at most `sample_size` rows.
    pub fn infer_schema(&mut self, sample_size: usize) -> CsvRelResult<Schema> {
        let (headers, rows) = self.load()?;
        schema::infer_schema_from(headers, rows, sample_size)
    }

    /// Fail with the first missing required column.
    pub fn check_required_columns(&mut self, required: &[&str]) -> CsvRelResult<()> {
        let headers = self.headers()?;
        schema::check_required_columns(&headers, required)
    }

    /// Compare the inferred schema against an expected one; mismatches are
    /// logged and reported as `false`, not raised.
    pub fn validate_against_schema(
        &mut self,
        expected: &Schema,
        sample_size: usize,
    ) -> CsvRelResult<bool> {
        let actual = self.infer_schema(sample_size)?;
        Ok(schema::validate_against_schema(&actual, expected))
    }

    /// Normalize embedded JSON text in a column (explicit field-level edit):
    /// cells that look like objects are re-serialized in canonical form.
    pub fn parse_json_field(&mut self, column: &str) -> CsvRelResult<()> {
        let (_, rows) = self.load()?;
        for row in rows {
            let Some(text) = row.get(column).map(str::to_string) else {
                continue;
            };
            if text.trim_start().starts_with('{') {
                let parsed: serde_json::Value =
                    serde_json::from_str(&text).map_err(|e| CsvRelError::RowDecode {
                        target: format!("json field '{column}'"),
                        message: e.to_string(),
                    })?;
                row.set(column, parsed.to_string());
            }
        }
        Ok(())
    }

    /// Export the cached rows as CSV.
    pub fn write_csv(&mut self, path: &Path) -> CsvRelResult<()> {
        let (_, rows) = self.load()?;
        crate::sink::write_csv(rows, path)
    }

    /// Export the cached rows as a JSON array.
    pub fn write_json(&mut self, path: &Path) -> CsvRelResult<()> {
        let (_, rows) = self.load()?;
        crate::sink::write_json(rows, path)
    }

    /// Export the cached rows as newline-delimited JSON.
    pub fn write_json_lines(&mut self, path: &Path) -> CsvRelResult<()> {
        let (_, rows) = self.load()?;
        crate::sink::write_json_lines(rows, path)
    }
}

//! Row sinks — export rows to tabular or JSON files.
//!
//! Optional output surface; none of the composition logic depends on it.

use crate::error::CsvRelResult;
use crate::row::{Row, rows_to_json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write rows as CSV with a header line. Empty input writes nothing.
pub fn write_csv(rows: &[Row], path: &Path) -> CsvRelResult<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(first.columns())?;
    for row in rows {
        writer.write_record(row.values().iter().map(|v| v.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array.
pub fn write_json(rows: &[Row], path: &Path) -> CsvRelResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &rows_to_json(rows))?;
    Ok(())
}

/// Write rows as newline-delimited JSON objects.
pub fn write_json_lines(rows: &[Row], path: &Path) -> CsvRelResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        serde_json::to_writer(&mut writer, &row.to_json())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::from_pairs([("id", "1"), ("name", "Alice")]),
            Row::from_pairs([("id", "2"), ("name", "Bob")]),
        ]
    }

    #[test]
    fn csv_roundtrip_preserves_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&sample_rows(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,name"));
        assert_eq!(lines.next(), Some("1,Alice"));
        assert_eq!(lines.next(), Some("2,Bob"));
    }

    #[test]
    fn json_array_detects_numeric_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&sample_rows(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["id"], serde_json::json!(1));
        assert_eq!(value[1]["name"], serde_json::json!("Bob"));
    }

    #[test]
    fn json_lines_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ndjson");
        write_json_lines(&sample_rows(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["name"], serde_json::json!("Alice"));
    }

    #[test]
    fn empty_rows_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv(&[], &path).unwrap();
        assert!(!path.exists());
    }
}

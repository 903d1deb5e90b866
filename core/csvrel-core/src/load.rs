//! Bulk loader — bind an ordered row sequence to a named relation.
//!
//! Table creation is idempotent (`CREATE TABLE IF NOT EXISTS`) and every
//! column is created as a generic text type; the rows are submitted as one
//! batch that succeeds or fails as a unit. Empty input is a no-op that
//! still returns a valid (empty) relation handle.

use crate::backend::Backend;
use crate::error::CsvRelResult;
use crate::plan::stmt;
use crate::relation::Relation;
use crate::row::Row;
use std::sync::Arc;
use tracing::{debug, info};

/// Load rows into `table` on `backend`, returning the bound relation.
pub fn load(rows: &[Row], table: &str, backend: &Arc<dyn Backend>) -> CsvRelResult<Relation> {
    let table = stmt::sanitize_ident(table);
    let relation = Relation::new(table.clone(), Arc::clone(backend));

    let Some(first) = rows.first() else {
        debug!(table, "no rows to load");
        return Ok(relation);
    };

    // The first row's column order defines the table's column order.
    let source_columns = first.columns().to_vec();
    let columns: Vec<String> = source_columns.iter().map(|c| stmt::sanitize_ident(c)).collect();

    let mut conn = backend.acquire()?;
    conn.execute(&stmt::create_table(&table, &columns))?;

    let values: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            source_columns
                .iter()
                .map(|col| row.get(col).unwrap_or("").to_string())
                .collect()
        })
        .collect();
    let inserted = conn.insert_batch(&table, &columns, &values)?;

    info!(
        table,
        rows = inserted,
        backend = backend.backend_id(),
        "bulk load complete"
    );
    Ok(relation)
}

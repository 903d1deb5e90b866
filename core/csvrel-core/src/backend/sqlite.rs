//! Embedded backend on SQLite (rusqlite, bundled).
//!
//! The default convenience backend: a single in-process engine shared by all
//! sessions. One `rusqlite::Connection` pins the database (for in-memory
//! databases this is what keeps them alive); `acquire` hands out session
//! handles that serialize their statements through it.

use crate::backend::{Backend, Connection};
use crate::error::{CsvRelError, CsvRelResult};
use crate::row::Row;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Embedded single-process engine.
pub struct SqliteBackend {
    conn: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteBackend {
    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> CsvRelResult<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(connect_err)?;
        Ok(SqliteBackend {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open or create a file-backed database.
    pub fn open(path: &Path) -> CsvRelResult<Self> {
        let conn = rusqlite::Connection::open(path).map_err(connect_err)?;
        Ok(SqliteBackend {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn connect_err(err: rusqlite::Error) -> CsvRelError {
    CsvRelError::Connection {
        backend: "sqlite".to_string(),
        message: err.to_string(),
    }
}

impl Backend for SqliteBackend {
    fn acquire(&self) -> CsvRelResult<Box<dyn Connection + '_>> {
        Ok(Box::new(SqliteSession {
            conn: Arc::clone(&self.conn),
        }))
    }

    fn backend_id(&self) -> &str {
        "sqlite"
    }
}

struct SqliteSession {
    conn: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteSession {
    fn lock(&self) -> CsvRelResult<MutexGuard<'_, rusqlite::Connection>> {
        self.conn.lock().map_err(|_| CsvRelError::LockPoisoned)
    }
}

impl Connection for SqliteSession {
    fn execute(&mut self, sql: &str) -> CsvRelResult<()> {
        let guard = self.lock()?;
        guard.execute_batch(sql)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> CsvRelResult<Vec<Row>> {
        let guard = self.lock()?;
        let mut stmt = guard.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut pairs = Vec::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                let value: rusqlite::types::Value = row.get(i)?;
                pairs.push((name.clone(), value_to_text(value)));
            }
            out.push(Row::from_nullable_pairs(pairs));
        }
        Ok(out)
    }

    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> CsvRelResult<usize> {
        let mut guard = self.lock()?;
        let tx = guard.transaction()?;
        {
            let placeholders = vec!["?"; columns.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders
            );
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn columns_of(&mut self, relation: &str) -> CsvRelResult<Vec<String>> {
        let guard = self.lock()?;
        let stmt = guard.prepare(&format!("SELECT * FROM {relation} LIMIT 0"))?;
        Ok(stmt.column_names().iter().map(|c| c.to_string()).collect())
    }

    fn column_types_of(&mut self, relation: &str) -> CsvRelResult<Vec<(String, String)>> {
        let guard = self.lock()?;
        let stmt = guard.prepare(&format!("SELECT * FROM {relation} LIMIT 0"))?;
        Ok(stmt
            .columns()
            .iter()
            .map(|col| {
                (
                    col.name().to_string(),
                    col.decl_type().unwrap_or("").to_string(),
                )
            })
            .collect())
    }
}

fn value_to_text(value: rusqlite::types::Value) -> Option<String> {
    use rusqlite::types::Value;
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

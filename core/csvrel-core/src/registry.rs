//! View/relation registry — create, drop, preview and introspect views.
//!
//! All operations are idempotent with respect to existence: drop never fails
//! when the view is absent, and create always drops first, so the second of
//! two definitions wins deterministically. `preview` and `schema_of` are
//! read-only diagnostics, safe at any point in a composition pipeline.

use crate::backend::Backend;
use crate::error::CsvRelResult;
use crate::plan::stmt;
use crate::schema::{ColumnType, Schema};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of derived relations on one backend.
pub struct ViewRegistry {
    backend: Arc<dyn Backend>,
}

impl ViewRegistry {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        ViewRegistry { backend }
    }

    /// Create a view from a select expression, replacing any existing
    /// definition (drop-then-create).
    pub fn create_view(&self, name: &str, select: &str) -> CsvRelResult<()> {
        let mut conn = self.backend.acquire()?;
        conn.execute(&stmt::drop_view_if_exists(name))?;
        conn.execute(&stmt::create_view(name, select))?;
        info!(view = name, "created view");
        Ok(())
    }

    /// Drop a view; succeeds whether or not it exists.
    pub fn drop_view_if_exists(&self, name: &str) -> CsvRelResult<()> {
        let mut conn = self.backend.acquire()?;
        conn.execute(&stmt::drop_view_if_exists(name))?;
        debug!(view = name, "dropped view if existed");
        Ok(())
    }

    /// First `limit` rows of a table or view as display strings.
    pub fn preview(&self, name: &str, limit: usize) -> CsvRelResult<Vec<String>> {
        let mut conn = self.backend.acquire()?;
        let rows = conn.query(&stmt::select_limit(name, limit))?;
        Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(col, val)| format!("{col}: {}", val.unwrap_or("NULL")))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect())
    }

    /// Schema of a table or view from live backend introspection.
    ///
    /// Backend-reported type names are mapped onto the inference lattice;
    /// this never invokes the schema inferencer.
    pub fn schema_of(&self, name: &str) -> CsvRelResult<Schema> {
        let mut conn = self.backend.acquire()?;
        let columns = conn.column_types_of(name)?;
        Ok(Schema::from_pairs(
            columns
                .into_iter()
                .map(|(col, ty)| (col, map_backend_type(&ty))),
        ))
    }
}

/// Map an engine's type name onto the inference lattice.
pub fn map_backend_type(type_name: &str) -> ColumnType {
    let upper = type_name.to_ascii_uppercase();
    if upper.contains("INT") {
        ColumnType::Integer
    } else if ["REAL", "FLOAT", "DOUBLE", "NUMERIC", "DECIMAL"]
        .iter()
        .any(|t| upper.contains(t))
    {
        ColumnType::Double
    } else if ["CHAR", "TEXT", "CLOB"].iter().any(|t| upper.contains(t)) {
        ColumnType::String
    } else {
        ColumnType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::sqlite::SqliteBackend;

    fn registry() -> ViewRegistry {
        let backend = SqliteBackend::open_in_memory().unwrap();
        ViewRegistry::new(Arc::new(backend))
    }

    #[test]
    fn map_backend_type_lattice() {
        assert_eq!(map_backend_type("INTEGER"), ColumnType::Integer);
        assert_eq!(map_backend_type("bigint"), ColumnType::Integer);
        assert_eq!(map_backend_type("DOUBLE PRECISION"), ColumnType::Double);
        assert_eq!(map_backend_type("VARCHAR(255)"), ColumnType::String);
        assert_eq!(map_backend_type("character varying"), ColumnType::String);
        assert_eq!(map_backend_type("TEXT"), ColumnType::String);
        assert_eq!(map_backend_type(""), ColumnType::Unknown);
    }

    #[test]
    fn drop_absent_view_never_fails() {
        registry().drop_view_if_exists("never_created").unwrap();
    }

    #[test]
    fn create_view_replaces_previous_definition() {
        let reg = registry();
        {
            let mut conn = reg.backend.acquire().unwrap();
            conn.execute("CREATE TABLE t (v VARCHAR(255))").unwrap();
            conn.execute("INSERT INTO t VALUES ('1'), ('2'), ('3')")
                .unwrap();
        }
        reg.create_view("top", "SELECT v FROM t").unwrap();
        reg.create_view("top", "SELECT v FROM t WHERE v = '1'")
            .unwrap();

        let mut conn = reg.backend.acquire().unwrap();
        let rows = conn.query("SELECT * FROM top").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn preview_formats_rows_and_respects_limit() {
        let reg = registry();
        {
            let mut conn = reg.backend.acquire().unwrap();
            conn.execute("CREATE TABLE t (a VARCHAR(255), b VARCHAR(255))")
                .unwrap();
            conn.execute("INSERT INTO t VALUES ('1', 'x'), ('2', 'y'), ('3', 'z')")
                .unwrap();
        }
        let lines = reg.preview("t", 2).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "a: 1\tb: x");
    }

    #[test]
    fn schema_of_uses_backend_types() {
        let reg = registry();
        {
            let mut conn = reg.backend.acquire().unwrap();
            conn.execute("CREATE TABLE t (id INTEGER, name VARCHAR(255), score DOUBLE)")
                .unwrap();
        }
        let schema = reg.schema_of("t").unwrap();
        assert_eq!(schema.get("id"), Some(ColumnType::Integer));
        assert_eq!(schema.get("name"), Some(ColumnType::String));
        assert_eq!(schema.get("score"), Some(ColumnType::Double));
    }
}

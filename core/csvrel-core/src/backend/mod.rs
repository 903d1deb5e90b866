//! Backend abstraction — the pluggable execution engine.
//!
//! The composition layer (loader, planners, registry) is backend-agnostic:
//! it only needs a connection that executes statements, answers queries and
//! introspects relation structure. An embedded single-process engine and a
//! networked server engine satisfy the same traits identically, and no
//! ambient global connection string exists anywhere — every call site is
//! handed an explicit `Backend`.

use crate::error::CsvRelResult;
use crate::row::Row;

pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

/// Capability object for acquiring execution connections.
pub trait Backend: Send + Sync {
    /// Open a scoped connection. Dropping the returned handle releases it.
    fn acquire(&self) -> CsvRelResult<Box<dyn Connection + '_>>;

    /// Identifier of the engine this backend fronts (e.g. "sqlite").
    fn backend_id(&self) -> &str;
}

/// A live connection to the execution engine.
///
/// All operations are synchronous and block until the backend responds.
/// Query results are fully materialized; there is no cursor mode.
pub trait Connection {
    /// Execute a statement that produces no rows.
    fn execute(&mut self, sql: &str) -> CsvRelResult<()>;

    /// Run a query and materialize every result row.
    ///
    /// Values come back as display strings; NULL is `None`.
    fn query(&mut self, sql: &str) -> CsvRelResult<Vec<Row>>;

    /// Insert all rows into `table` as one batch, parameterized in the
    /// engine's own placeholder dialect. Succeeds or fails as a unit.
    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> CsvRelResult<usize>;

    /// Column names of a table or view, from live introspection.
    fn columns_of(&mut self, relation: &str) -> CsvRelResult<Vec<String>>;

    /// Column names and engine-reported type names of a table or view.
    fn column_types_of(&mut self, relation: &str) -> CsvRelResult<Vec<(String, String)>>;
}

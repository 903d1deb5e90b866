//! Relation handle — a named table or view bound to one backend.
//!
//! A `Relation` stores no column list: structure is always re-derived from
//! the backend on demand, since the backend is the source of truth after
//! creation. Two handles are distinct entities even when they name the same
//! physical table.

use crate::backend::Backend;
use crate::error::{CsvRelError, CsvRelResult};
use crate::plan::join::{JoinKind, JoinTarget};
use crate::plan::stmt;
use crate::row::Row;
use std::sync::Arc;

/// A named, queryable relation on a backend.
#[derive(Clone)]
pub struct Relation {
    name: String,
    backend: Arc<dyn Backend>,
}

impl Relation {
    pub fn new(name: impl Into<String>, backend: Arc<dyn Backend>) -> Self {
        Relation {
            name: name.into(),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Column names from live backend introspection. Never cached.
    pub fn columns(&self) -> CsvRelResult<Vec<String>> {
        let mut conn = self.backend.acquire()?;
        conn.columns_of(&self.name)
    }

    /// Row count of the relation.
    pub fn count(&self) -> CsvRelResult<u64> {
        let mut conn = self.backend.acquire()?;
        let rows = conn.query(&format!("SELECT COUNT(*) AS n FROM {}", self.name))?;
        let n = rows
            .first()
            .and_then(|r| r.get("n"))
            .ok_or_else(|| CsvRelError::Backend {
                message: format!("count query returned no rows for '{}'", self.name),
            })?;
        n.parse::<u64>().map_err(|_| CsvRelError::Backend {
            message: format!("count query returned non-numeric '{n}'"),
        })
    }

    /// Run an arbitrary query on this relation's backend, fully materialized.
    pub fn query(&self, sql: &str) -> CsvRelResult<Vec<Row>> {
        let mut conn = self.backend.acquire()?;
        conn.query(sql)
    }

    /// Create an index over the given columns, if absent.
    pub fn create_index(&self, columns: &[&str]) -> CsvRelResult<()> {
        let mut conn = self.backend.acquire()?;
        conn.execute(&stmt::create_index(&self.name, columns))
    }

    /// Two-way join with the default (uniform) aliasing policy.
    pub fn join(
        &self,
        other: &Relation,
        kind: JoinKind,
        condition: Option<&str>,
        output: &str,
    ) -> CsvRelResult<Relation> {
        crate::plan::join::join(self, other, kind, condition, output)
    }

    /// Multi-way join with this relation as the base (alias `a`).
    pub fn join_multiple(&self, output: &str, targets: &[JoinTarget]) -> CsvRelResult<Relation> {
        crate::plan::join::join_multiple(output, self, targets)
    }

    /// Union with another relation; `distinct` eliminates duplicates.
    pub fn union(&self, other: &Relation, output: &str, distinct: bool) -> CsvRelResult<Relation> {
        crate::plan::union::union(self, other, output, distinct)
    }
}

impl std::fmt::Debug for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relation")
            .field("name", &self.name)
            .field("backend", &self.backend.backend_id())
            .finish()
    }
}

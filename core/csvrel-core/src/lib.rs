//! # csvrel — relational composition over flat tabular files
//!
//! csvrel treats CSV files as named relations on a pluggable SQL execution
//! backend and composes them through joins and set operations, without a
//! hand-written schema or a full query engine of its own.
//!
//! ## Quick start
//!
//! ```no_run
//! use csvrel_core::backend::Backend;
//! use csvrel_core::backend::sqlite::SqliteBackend;
//! use csvrel_core::plan::JoinKind;
//! use csvrel_core::source::CsvSource;
//! use std::sync::Arc;
//!
//! # fn main() -> csvrel_core::CsvRelResult<()> {
//! let backend: Arc<dyn Backend> = Arc::new(SqliteBackend::open_in_memory()?);
//!
//! let emp = CsvSource::from_path("employees.csv").load_to(&backend)?;
//! let dept = CsvSource::from_path("departments.csv").load_to(&backend)?;
//!
//! let joined = emp.join(
//!     &dept,
//!     JoinKind::Left,
//!     Some("a.department_id = b.id"),
//!     "emp_with_dept",
//! )?;
//! assert_eq!(joined.count()?, emp.count()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! CSV file → CsvView (inference, validation)
//!          → Bulk Loader → Relation on a Backend
//!          → Join / Union planners → derived view Relations
//!          → ViewRegistry (preview, introspection)
//! ```
//!
//! ## Module structure
//!
//! - [`source`] — tabular sources and the in-memory view
//! - [`schema`] — type inference over un-typed rows
//! - [`backend`] — pluggable execution backends (embedded SQLite by
//!   default, PostgreSQL behind the `postgres` feature)
//! - [`load`] — bulk loading rows into backend tables
//! - [`relation`] — named relation handles
//! - [`plan`] — join and set-operation planners, statement builders
//! - [`registry`] — view creation, preview and introspection
//! - [`sink`] — CSV/JSON row exports

pub mod backend;
pub mod error;
pub mod load;
pub mod plan;
pub mod registry;
pub mod relation;
pub mod row;
pub mod schema;
pub mod sink;
pub mod source;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use error::{CsvRelError, CsvRelResult};
pub use plan::{AliasStyle, JoinKind, JoinTarget};
pub use registry::ViewRegistry;
pub use relation::Relation;
pub use row::Row;
pub use schema::{ColumnType, Schema};
pub use source::{CsvSource, CsvView};

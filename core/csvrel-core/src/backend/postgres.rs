//! Networked server backend on PostgreSQL (`postgres` crate, synchronous).
//!
//! Satisfies the same capability traits as the embedded engine: the loader
//! and planners never branch on which backend they were handed. Reads go
//! through the simple-query protocol so values come back as text, matching
//! the generic text-typed storage the loader creates.

use crate::backend::{Backend, Connection};
use crate::error::{CsvRelError, CsvRelResult};
use crate::row::Row;
use postgres::types::ToSql;
use postgres::{Client, NoTls, SimpleQueryMessage};

/// External server engine, one client per acquired connection.
pub struct PostgresBackend {
    url: String,
}

impl PostgresBackend {
    /// `url` is a standard connection string, e.g.
    /// `host=localhost user=app password=secret dbname=csvrel`.
    pub fn new(url: impl Into<String>) -> Self {
        PostgresBackend { url: url.into() }
    }
}

impl Backend for PostgresBackend {
    fn acquire(&self) -> CsvRelResult<Box<dyn Connection + '_>> {
        let client = Client::connect(&self.url, NoTls).map_err(|e| CsvRelError::Connection {
            backend: "postgres".to_string(),
            message: e.to_string(),
        })?;
        Ok(Box::new(PostgresSession { client }))
    }

    fn backend_id(&self) -> &str {
        "postgres"
    }
}

struct PostgresSession {
    client: Client,
}

impl Connection for PostgresSession {
    fn execute(&mut self, sql: &str) -> CsvRelResult<()> {
        self.client.batch_execute(sql)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> CsvRelResult<Vec<Row>> {
        let mut out = Vec::new();
        for message in self.client.simple_query(sql)? {
            if let SimpleQueryMessage::Row(row) = message {
                let pairs: Vec<(String, Option<String>)> = row
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| (col.name().to_string(), row.get(i).map(str::to_string)))
                    .collect();
                out.push(Row::from_nullable_pairs(pairs));
            }
        }
        Ok(out)
    }

    fn insert_batch(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> CsvRelResult<usize> {
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut tx = self.client.transaction()?;
        let stmt = tx.prepare(&sql)?;
        for row in rows {
            let params: Vec<&(dyn ToSql + Sync)> =
                row.iter().map(|v| v as &(dyn ToSql + Sync)).collect();
            tx.execute(&stmt, &params)?;
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn columns_of(&mut self, relation: &str) -> CsvRelResult<Vec<String>> {
        for message in self
            .client
            .simple_query(&format!("SELECT * FROM {relation} LIMIT 0"))?
        {
            if let SimpleQueryMessage::RowDescription(columns) = message {
                return Ok(columns.iter().map(|c| c.name().to_string()).collect());
            }
        }
        Err(CsvRelError::Backend {
            message: format!("no row description for relation '{relation}'"),
        })
    }

    fn column_types_of(&mut self, relation: &str) -> CsvRelResult<Vec<(String, String)>> {
        // Unquoted identifiers fold to lower case in PostgreSQL.
        let name = relation.to_ascii_lowercase().replace('\'', "''");
        let sql = format!(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_name = '{name}' ORDER BY ordinal_position"
        );
        let mut out = Vec::new();
        for message in self.client.simple_query(&sql)? {
            if let SimpleQueryMessage::Row(row) = message {
                out.push((
                    row.get(0).unwrap_or("").to_string(),
                    row.get(1).unwrap_or("").to_string(),
                ));
            }
        }
        Ok(out)
    }
}

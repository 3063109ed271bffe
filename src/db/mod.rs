//! Database abstraction layer for sales-report.
//!
//! Provides a trait-based interface for database operations, so the report
//! runner can be driven by the SQLite client or by test doubles.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens the report database described by the configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &DatabaseConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// A client owns exactly one connection. Queries take `&mut self` because
/// the connection is not shared, and fail once `close` has run.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Executes a SQL query and returns the results.
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<()>;

    /// Returns true while the connection is open.
    fn is_open(&self) -> bool;
}

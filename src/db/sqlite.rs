//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! over a single read-only sqlx connection.

use crate::config::DatabaseConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Executor, Row as SqlxRow, Statement,
    TypeInfo, ValueRef,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// SQLite database client.
///
/// Holds `None` once the connection has been closed.
#[derive(Debug)]
pub struct SqliteClient {
    conn: Option<SqliteConnection>,
    path: PathBuf,
}

impl SqliteClient {
    /// Opens a read-only connection to the configured database file.
    ///
    /// The file is never created: a missing path is a connection error.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let path = config.path.clone();
        debug!("Opening database at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        let conn = options
            .connect()
            .await
            .map_err(|e| map_connection_error(e, &path))?;

        info!("Connected to {}", config.display_string());
        Ok(Self {
            conn: Some(conn),
            path,
        })
    }

    /// Returns the path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&mut self) -> Result<&mut SqliteConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| ReportError::connection("Database connection is closed"))
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let conn = self.connection()?;
        let start = Instant::now();

        let result = sqlx::query(sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| ReportError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        // Column metadata comes from the first row, or from the prepared
        // statement when the result is empty.
        let columns: Vec<ColumnInfo> = match result.first() {
            Some(first_row) => first_row
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            None => fetch_column_metadata(conn, sql).await.unwrap_or_default(),
        };

        let rows: Vec<Row> = result.iter().map(convert_row).collect();
        debug!(
            "Query returned {} rows in {:?}: {}",
            rows.len(),
            execution_time,
            sql
        );

        Ok(QueryResult {
            execution_time,
            ..QueryResult::with_data(columns, rows)
        })
    }

    async fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            Some(conn) => {
                conn.close()
                    .await
                    .map_err(|e| ReportError::disconnect(e.to_string()))?;
                info!("Closed database {}", self.path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

/// Reads column metadata from a prepared statement without fetching rows.
async fn fetch_column_metadata(conn: &mut SqliteConnection, sql: &str) -> Result<Vec<ColumnInfo>> {
    let statement = (&mut *conn)
        .prepare(sql)
        .await
        .map_err(|e| ReportError::query(format_query_error(e)))?;

    Ok(statement
        .columns()
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect())
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single cell using its runtime storage class.
///
/// SQLite is dynamically typed, so the declared column type is not reliable
/// for expressions such as `IFNULL` or `ROUND`.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // TEXT, DATE, DATETIME and anything else decode as text
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps sqlx open errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, path: &Path) -> ReportError {
    let error_str = error.to_string().to_lowercase();
    let path = path.display();

    if error_str.contains("unable to open") || error_str.contains("no such file") {
        ReportError::connection(format!(
            "Cannot open database file '{path}'. Check that it exists and is readable."
        ))
    } else if error_str.contains("not a database") {
        ReportError::connection(format!("'{path}' is not a SQLite database."))
    } else if error_str.contains("locked") || error_str.contains("busy") {
        ReportError::connection(format!(
            "Database '{path}' is locked by another process."
        ))
    } else {
        ReportError::connection(format!("Failed to open '{path}': {error}"))
    }
}

/// Formats a query error, preferring the SQLite message when there is one.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}

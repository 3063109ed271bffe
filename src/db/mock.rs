//! Mock database clients for testing.
//!
//! Provides in-memory clients with scripted results, used to drive the
//! report runner without a database file.

use super::{DatabaseClient, QueryResult};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// A mock database client that returns predefined results.
///
/// Unscripted queries return an empty result. Every executed statement is
/// recorded in order.
#[derive(Debug)]
pub struct MockDatabaseClient {
    results: HashMap<String, QueryResult>,
    errors: HashMap<String, String>,
    close_error: Option<String>,
    executed: Vec<String>,
    open: bool,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with no scripted results.
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            errors: HashMap::new(),
            close_error: None,
            executed: Vec::new(),
            open: true,
        }
    }

    /// Scripts the result returned for `sql`.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(sql.into(), result);
        self
    }

    /// Scripts a query error for `sql`.
    pub fn with_error(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(sql.into(), message.into());
        self
    }

    /// Makes `close` fail with the given message.
    pub fn with_close_error(mut self, message: impl Into<String>) -> Self {
        self.close_error = Some(message.into());
        self
    }

    /// Returns every statement executed so far.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        if !self.open {
            return Err(ReportError::connection("Database connection is closed"));
        }
        self.executed.push(sql.to_string());

        if let Some(message) = self.errors.get(sql) {
            return Err(ReportError::query(message.clone()));
        }
        Ok(self.results.get(sql).cloned().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        match &self.close_error {
            Some(message) => Err(ReportError::disconnect(message.clone())),
            None => Ok(()),
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// A client whose every query fails, as if the connection had dropped.
#[derive(Debug)]
pub struct FailingDatabaseClient {
    message: String,
    attempts: usize,
}

impl FailingDatabaseClient {
    /// Creates a client failing every query with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts: 0,
        }
    }

    /// Returns how many queries were attempted.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&mut self, _sql: &str) -> Result<QueryResult> {
        self.attempts += 1;
        Err(ReportError::connection(self.message.clone()))
    }

    async fn close(&mut self) -> Result<()> {
        Err(ReportError::disconnect(self.message.clone()))
    }

    fn is_open(&self) -> bool {
        false
    }
}

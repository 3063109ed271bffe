//! Error types for sales-report.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for report operations.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Database connection errors (missing file, not a database, connection closed).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (missing tables, syntax errors, refused statements).
    #[error("Query error: {0}")]
    Query(String),

    /// Errors raised while closing the connection.
    #[error("Disconnect error: {0}")]
    Disconnect(String),

    /// Configuration errors (invalid config file, unreadable path, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (output failures, unexpected states).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a disconnect error with the given message.
    pub fn disconnect(msg: impl Into<String>) -> Self {
        Self::Disconnect(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Disconnect(_) => "Disconnect Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ReportError.
pub type Result<T> = std::result::Result<T, ReportError>;

//! Configuration management for sales-report.
//!
//! Handles loading configuration from an optional TOML file. Every field has a
//! default, so running without a config file reproduces the fixed behavior:
//! read `data.sqlite` from the working directory and log warnings only.

use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for sales-report.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Report database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report database configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Path to the SQLite file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data.sqlite")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl DatabaseConfig {
    /// Creates a config pointing at the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns a display string for log messages.
    pub fn display_string(&self) -> String {
        format!("sqlite:{} (read-only)", self.path.display())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sales-report")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::config(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::parse_toml(&content, path)
    }

    /// Loads the file at `path`, falling back to defaults when it is broken.
    ///
    /// The load error, if any, is handed back so the caller can report it
    /// once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<ReportError>) {
        match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ReportError::config(format!("{}:\n  {e}", path.display())))
    }

    /// Applies a database path override (from the command line).
    pub fn with_database_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database.path = path;
        }
        self
    }
}

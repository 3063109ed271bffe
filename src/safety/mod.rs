//! Query safety classification module.
//!
//! Parses SQL and classifies it as safe, mutating, or destructive. The report
//! runner only executes statements classified as safe.

mod parser;

pub use parser::{classify_sql, SqlClassifier};

use std::fmt;

/// Safety level classification for SQL queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Read-only queries (SELECT, VALUES, plain EXPLAIN).
    Safe,
    /// Data modification queries (INSERT, UPDATE, REPLACE).
    Mutating,
    /// Data loss or schema changes (DELETE, DROP, ALTER, CREATE), and
    /// anything that could not be classified.
    Destructive,
}

impl SafetyLevel {
    /// Returns true if statements at this level may run in a report.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Ordering used when several statements are combined (higher = worse).
    pub(crate) fn priority(&self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Mutating => 1,
            Self::Destructive => 2,
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// The type of SQL statement detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Alter,
    Create,
    Explain,
    /// Multiple statements detected; contains the most dangerous type.
    Multiple(Box<StatementType>),
    /// Statement type could not be determined.
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Drop => write!(f, "DROP"),
            Self::Alter => write!(f, "ALTER"),
            Self::Create => write!(f, "CREATE"),
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Multiple(inner) => write!(f, "Multiple ({})", inner),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying a SQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The determined safety level.
    pub level: SafetyLevel,
    /// The type of statement(s) detected.
    pub statement_type: StatementType,
    /// Reason the statement was not classified normally, if any.
    pub warning: Option<String>,
}

impl ClassificationResult {
    /// Creates a new classification result.
    pub fn new(level: SafetyLevel, statement_type: StatementType) -> Self {
        Self {
            level,
            statement_type,
            warning: None,
        }
    }

    /// Creates a classification result with a warning message.
    pub fn with_warning(
        level: SafetyLevel,
        statement_type: StatementType,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            level,
            statement_type,
            warning: Some(warning.into()),
        }
    }

    /// Returns true if the statement may run in a read-only report.
    pub fn is_read_only(&self) -> bool {
        self.level.is_read_only()
    }

    /// Describes why the statement is refused, for error messages.
    pub fn refusal_reason(&self) -> String {
        match &self.warning {
            Some(warning) => format!(
                "refusing {} statement ({}): {}",
                self.statement_type, self.level, warning
            ),
            None => format!(
                "refusing {} statement ({}) in a read-only report",
                self.statement_type, self.level
            ),
        }
    }
}

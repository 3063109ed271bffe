//! Result types shared by the database clients and the report.

use std::fmt;
use std::time::Duration;

/// Rows and column metadata returned by one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
    /// Wall time spent fetching the rows.
    pub execution_time: Duration,
    pub row_count: usize,
}

impl QueryResult {
    /// Builds a result from fetched columns and rows.
    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            row_count: rows.len(),
            columns,
            rows,
            execution_time: Duration::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Cells of the column called `name`, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Replaces NULL cells of column `name` with the text `fallback`.
    ///
    /// Returns false, leaving the rows untouched, when there is no such column.
    pub fn coalesce_column(&mut self, name: &str, fallback: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        let fallback = Value::from(fallback);

        for cell in self.rows.iter_mut().filter_map(|row| row.get_mut(index)) {
            *cell = std::mem::take(cell).coalesce(&fallback);
        }
        true
    }
}

/// Name and reported type of a result column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type for table columns; SQLite reports `NULL` for most
    /// expressions.
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

pub type Row = Vec<Value>;

/// One cell, tagged with the SQLite storage class it was read as.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns a copy of `fallback` for NULL, the value itself otherwise.
    pub fn coalesce(self, fallback: &Value) -> Value {
        match self {
            Value::Null => fallback.clone(),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

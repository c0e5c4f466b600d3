//! Core Database Backend Traits
//!
//! The store never talks to sqlx directly. It hands finished statements and
//! bound values to a [`DatabasePool`] and reads results back through
//! [`DatabaseRow`], so any backend that can execute ordered statements can
//! sit underneath it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use crate::error::{StoreError, StoreResult};

/// Statement executor backing every store
#[async_trait]
pub trait DatabasePool: Send + Sync {
    /// Execute a statement and return the affected row count
    async fn execute(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<u64>;

    /// Execute a query and return all result rows
    async fn fetch_all(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Vec<Box<dyn DatabaseRow>>>;

    /// Execute a query and return the first result row
    async fn fetch_optional(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Option<Box<dyn DatabaseRow>>>;

    /// Close the pool
    async fn close(&self) -> StoreResult<()>;

    /// Get pool statistics
    fn stats(&self) -> DatabasePoolStats;

    /// Round-trip a trivial statement and report how long it took
    async fn health_check(&self) -> StoreResult<std::time::Duration>;
}

/// Database pool statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabasePoolStats {
    pub total_connections: u32,
    pub idle_connections: u32,
    pub active_connections: u32,
}

/// Abstract database row
pub trait DatabaseRow: Send + Sync {
    /// Get a column value by index
    fn get_by_index(&self, index: usize) -> StoreResult<DatabaseValue>;

    /// Get a column value by name, `None` when the row has no such column
    fn get_by_name(&self, name: &str) -> StoreResult<Option<DatabaseValue>>;

    fn column_count(&self) -> usize;

    fn column_names(&self) -> Vec<String>;

    /// Convert row to a column map
    fn to_map(&self) -> StoreResult<HashMap<String, DatabaseValue>> {
        let mut map = HashMap::new();
        for (index, name) in self.column_names().into_iter().enumerate() {
            map.insert(name, self.get_by_index(index)?);
        }
        Ok(map)
    }
}

/// Typed column access used by entity decoders.
///
/// Missing columns and NULLs decode to the field's zero value, so rows
/// loaded with a restricted select list still hydrate.
pub trait DatabaseRowExt {
    fn text(&self, column: &str) -> StoreResult<String>;
    fn integer(&self, column: &str) -> StoreResult<i64>;
    fn optional_integer(&self, column: &str) -> StoreResult<Option<i64>>;
    fn float(&self, column: &str) -> StoreResult<f64>;
    fn boolean(&self, column: &str) -> StoreResult<bool>;
    fn timestamp(&self, column: &str) -> StoreResult<Option<DateTime<Utc>>>;
}

impl<R: DatabaseRow + ?Sized> DatabaseRowExt for R {
    fn text(&self, column: &str) -> StoreResult<String> {
        match self.get_by_name(column)? {
            None | Some(DatabaseValue::Null) => Ok(String::new()),
            Some(DatabaseValue::String(s)) => Ok(s),
            Some(other) => Ok(other.to_string()),
        }
    }

    fn integer(&self, column: &str) -> StoreResult<i64> {
        Ok(self.optional_integer(column)?.unwrap_or_default())
    }

    fn optional_integer(&self, column: &str) -> StoreResult<Option<i64>> {
        match self.get_by_name(column)? {
            None | Some(DatabaseValue::Null) => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| decode_error(column, "integer", &value)),
        }
    }

    fn float(&self, column: &str) -> StoreResult<f64> {
        match self.get_by_name(column)? {
            None | Some(DatabaseValue::Null) => Ok(0.0),
            Some(value) => value.as_f64().ok_or_else(|| decode_error(column, "float", &value)),
        }
    }

    fn boolean(&self, column: &str) -> StoreResult<bool> {
        match self.get_by_name(column)? {
            None | Some(DatabaseValue::Null) => Ok(false),
            Some(value) => value.as_bool().ok_or_else(|| decode_error(column, "boolean", &value)),
        }
    }

    fn timestamp(&self, column: &str) -> StoreResult<Option<DateTime<Utc>>> {
        match self.get_by_name(column)? {
            None | Some(DatabaseValue::Null) => Ok(None),
            Some(value) => value
                .as_datetime()
                .map(Some)
                .ok_or_else(|| decode_error(column, "timestamp", &value)),
        }
    }
}

fn decode_error(column: &str, expected: &str, value: &DatabaseValue) -> StoreError {
    StoreError::Serialization(format!(
        "Failed to decode column '{}' as {}: got {:?}",
        column, expected, value
    ))
}

/// Database value enumeration for type-safe parameter binding
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    DateTime(DateTime<Utc>),
}

impl DatabaseValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Zero-value test: NULL, empty text, 0, 0.0 and false.
    pub fn is_zero(&self) -> bool {
        match self {
            DatabaseValue::Null => true,
            DatabaseValue::Bool(b) => !*b,
            DatabaseValue::Int64(i) => *i == 0,
            DatabaseValue::Float64(f) => *f == 0.0,
            DatabaseValue::String(s) => s.is_empty(),
            DatabaseValue::DateTime(_) => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DatabaseValue::Int64(i) => Some(*i),
            DatabaseValue::Bool(b) => Some(i64::from(*b)),
            DatabaseValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DatabaseValue::Float64(f) => Some(*f),
            DatabaseValue::Int64(i) => Some(*i as f64),
            DatabaseValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DatabaseValue::Bool(b) => Some(*b),
            // SQLite stores booleans as 0/1
            DatabaseValue::Int64(i) => Some(*i != 0),
            DatabaseValue::String(s) => match s.as_str() {
                "true" | "t" | "1" => Some(true),
                "false" | "f" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DatabaseValue::DateTime(dt) => Some(*dt),
            DatabaseValue::String(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

/// Parse the textual timestamp forms the backends hand back.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}

impl fmt::Display for DatabaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseValue::Null => write!(f, "NULL"),
            DatabaseValue::Bool(b) => write!(f, "{}", b),
            DatabaseValue::Int64(i) => write!(f, "{}", i),
            DatabaseValue::Float64(v) => write!(f, "{}", v),
            DatabaseValue::String(s) => write!(f, "{}", s),
            DatabaseValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl From<bool> for DatabaseValue {
    fn from(value: bool) -> Self {
        DatabaseValue::Bool(value)
    }
}

impl From<i32> for DatabaseValue {
    fn from(value: i32) -> Self {
        DatabaseValue::Int64(i64::from(value))
    }
}

impl From<i64> for DatabaseValue {
    fn from(value: i64) -> Self {
        DatabaseValue::Int64(value)
    }
}

impl From<u32> for DatabaseValue {
    fn from(value: u32) -> Self {
        DatabaseValue::Int64(i64::from(value))
    }
}

impl From<f64> for DatabaseValue {
    fn from(value: f64) -> Self {
        DatabaseValue::Float64(value)
    }
}

impl From<String> for DatabaseValue {
    fn from(value: String) -> Self {
        DatabaseValue::String(value)
    }
}

impl From<&str> for DatabaseValue {
    fn from(value: &str) -> Self {
        DatabaseValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for DatabaseValue {
    fn from(value: DateTime<Utc>) -> Self {
        DatabaseValue::DateTime(value)
    }
}

impl<T> From<Option<T>> for DatabaseValue
where
    T: Into<DatabaseValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DatabaseValue::Null,
        }
    }
}

/// SQL dialect enumeration for generating database-specific SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    PostgreSQL,
    SQLite,
}

impl SqlDialect {
    /// Placeholder for the zero-based parameter `index`
    pub fn parameter_placeholder(&self, index: usize) -> String {
        match self {
            SqlDialect::PostgreSQL => format!("${}", index + 1),
            SqlDialect::SQLite => "?".to_string(),
        }
    }

    /// Auto-increment primary key column definition
    pub fn auto_increment_primary_key(&self) -> &'static str {
        match self {
            SqlDialect::PostgreSQL => "BIGSERIAL PRIMARY KEY",
            SqlDialect::SQLite => "INTEGER PRIMARY KEY AUTOINCREMENT",
        }
    }

    /// Column type for timestamps
    pub fn timestamp_type(&self) -> &'static str {
        match self {
            SqlDialect::PostgreSQL => "TIMESTAMPTZ",
            SqlDialect::SQLite => "DATETIME",
        }
    }

    /// Column type for floating point values
    pub fn float_type(&self) -> &'static str {
        match self {
            SqlDialect::PostgreSQL => "DOUBLE PRECISION",
            SqlDialect::SQLite => "REAL",
        }
    }
}

/// Database backend trait that provides database-specific implementations
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    /// Create a connection pool from a database URL
    async fn create_pool(&self, database_url: &str, config: &DatabasePoolConfig) -> StoreResult<Arc<dyn DatabasePool>>;

    /// Get the SQL dialect used by this backend
    fn sql_dialect(&self) -> SqlDialect;

    /// Get the backend type
    fn backend_type(&self) -> crate::backends::DatabaseBackendType;

    /// Validate a database URL for this backend
    fn validate_database_url(&self, url: &str) -> StoreResult<()>;
}

/// Database pool configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DatabasePoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub idle_timeout_seconds: Option<u64>,
    pub max_lifetime_seconds: Option<u64>,
    pub test_before_acquire: bool,
}

impl Default for DatabasePoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(600), // 10 minutes
            max_lifetime_seconds: Some(1800), // 30 minutes
            test_before_acquire: true,
        }
    }
}

//! SQLite Backend Implementation
//!
//! SQLite implementation of the backend traits on top of sqlx. Used for
//! local development and for the in-memory databases the integration tests
//! run against.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Pool, Row as SqlxRow, Sqlite, TypeInfo, ValueRef};
use crate::error::{StoreError, StoreResult};
use super::core::*;

/// SQLite database backend implementation
#[derive(Debug, Default)]
pub struct SqliteBackend;

impl SqliteBackend {
    pub fn new() -> Self {
        Self
    }

    /// In-memory databases live inside a single connection
    fn is_memory_url(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}

#[async_trait]
impl DatabaseBackend for SqliteBackend {
    async fn create_pool(&self, database_url: &str, config: &DatabasePoolConfig) -> StoreResult<Arc<dyn DatabasePool>> {
        self.validate_database_url(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        let mut options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .test_before_acquire(config.test_before_acquire);

        if Self::is_memory_url(database_url) {
            tracing::debug!("In-memory SQLite database: pinning the pool to one connection");
            options = options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections);

            if let Some(idle_timeout) = config.idle_timeout_seconds {
                options = options.idle_timeout(Duration::from_secs(idle_timeout));
            }

            if let Some(max_lifetime) = config.max_lifetime_seconds {
                options = options.max_lifetime(Duration::from_secs(max_lifetime));
            }
        }

        let sqlx_pool = options.connect_with(connect_options).await.map_err(|e| {
            tracing::error!("Failed to create SQLite pool: {}", e);
            StoreError::Connection(format!("Failed to create SQLite pool: {}", e))
        })?;

        Ok(Arc::new(SqlitePool::new(Arc::new(sqlx_pool))))
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::SQLite
    }

    fn backend_type(&self) -> crate::backends::DatabaseBackendType {
        crate::backends::DatabaseBackendType::SQLite
    }

    fn validate_database_url(&self, url: &str) -> StoreResult<()> {
        if !url.starts_with("sqlite:") {
            return Err(StoreError::Configuration("Invalid SQLite URL scheme".to_string()));
        }
        Ok(())
    }
}

/// SQLite connection pool implementation
pub struct SqlitePool {
    pool: Arc<Pool<Sqlite>>,
}

impl SqlitePool {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }
}

fn bind_all<'q>(sql: &'q str, params: &[DatabaseValue]) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().fold(sqlx::query(sql), bind_database_value)
}

#[async_trait]
impl DatabasePool for SqlitePool {
    async fn execute(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<u64> {
        let result = bind_all(sql, params).execute(&*self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Vec<Box<dyn DatabaseRow>>> {
        let rows = bind_all(sql, params).fetch_all(&*self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| Box::new(SqliteDatabaseRow::new(row)) as Box<dyn DatabaseRow>)
            .collect())
    }

    async fn fetch_optional(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Option<Box<dyn DatabaseRow>>> {
        let row = bind_all(sql, params).fetch_optional(&*self.pool).await?;
        Ok(row.map(|r| Box::new(SqliteDatabaseRow::new(r)) as Box<dyn DatabaseRow>))
    }

    async fn close(&self) -> StoreResult<()> {
        self.pool.close().await;
        Ok(())
    }

    fn stats(&self) -> DatabasePoolStats {
        let total = self.pool.size();
        let idle = self.pool.num_idle() as u32;

        DatabasePoolStats {
            total_connections: total,
            idle_connections: idle,
            active_connections: total.saturating_sub(idle),
        }
    }

    async fn health_check(&self) -> StoreResult<Duration> {
        let start = Instant::now();

        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| StoreError::Connection(format!("Health check failed: {}", e)))?;

        Ok(start.elapsed())
    }
}

/// SQLite row implementation
pub struct SqliteDatabaseRow {
    row: SqliteRow,
}

impl SqliteDatabaseRow {
    pub fn new(row: SqliteRow) -> Self {
        Self { row }
    }
}

impl DatabaseRow for SqliteDatabaseRow {
    fn get_by_index(&self, index: usize) -> StoreResult<DatabaseValue> {
        sqlite_value_to_database_value(&self.row, index)
    }

    fn get_by_name(&self, name: &str) -> StoreResult<Option<DatabaseValue>> {
        match self.row.columns().iter().position(|col| col.name() == name) {
            Some(index) => sqlite_value_to_database_value(&self.row, index).map(Some),
            None => Ok(None),
        }
    }

    fn column_count(&self) -> usize {
        self.row.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.row.columns().iter().map(|col| col.name().to_string()).collect()
    }
}

fn bind_database_value<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &DatabaseValue,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        DatabaseValue::Null => query.bind(Option::<String>::None),
        DatabaseValue::Bool(b) => query.bind(*b),
        DatabaseValue::Int64(i) => query.bind(*i),
        DatabaseValue::Float64(f) => query.bind(*f),
        DatabaseValue::String(s) => query.bind(s.clone()),
        DatabaseValue::DateTime(dt) => query.bind(*dt),
    }
}

/// Convert a SQLite value to DatabaseValue.
///
/// SQLite reports the storage class of each value rather than the declared
/// column type, so booleans come back as integers and timestamps as text.
fn sqlite_value_to_database_value(row: &SqliteRow, index: usize) -> StoreResult<DatabaseValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(DatabaseValue::Null);
    }
    let type_name = raw.type_info().name().to_uppercase();

    let value = match type_name.as_str() {
        "INTEGER" | "INT" | "INT8" | "BIGINT" | "BOOLEAN" => {
            DatabaseValue::Int64(row.try_get_unchecked::<i64, _>(index)?)
        }
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => {
            DatabaseValue::Float64(row.try_get_unchecked::<f64, _>(index)?)
        }
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get_unchecked(index)?;
            DatabaseValue::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => DatabaseValue::String(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(SqliteBackend::is_memory_url("sqlite::memory:"));
        assert!(SqliteBackend::is_memory_url("sqlite://file?mode=memory"));
        assert!(!SqliteBackend::is_memory_url("sqlite://gadget.db"));
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let pool = SqliteBackend::new()
            .create_pool("sqlite::memory:", &DatabasePoolConfig::default())
            .await
            .unwrap();

        pool.execute(
            "CREATE TABLE gadgets (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, price REAL, active BOOLEAN)",
            &[],
        )
        .await
        .unwrap();

        let affected = pool
            .execute(
                "INSERT INTO gadgets (name, price, active) VALUES (?, ?, ?)",
                &["phone".into(), 199.5.into(), true.into()],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let row = pool
            .fetch_optional("SELECT id, name, price, active FROM gadgets", &[])
            .await
            .unwrap()
            .expect("row inserted above");

        assert_eq!(row.get_by_name("id").unwrap(), Some(DatabaseValue::Int64(1)));
        assert_eq!(row.get_by_name("name").unwrap(), Some(DatabaseValue::String("phone".to_string())));
        assert_eq!(row.get_by_name("price").unwrap(), Some(DatabaseValue::Float64(199.5)));
        assert_eq!(row.get_by_name("active").unwrap(), Some(DatabaseValue::Int64(1)));
        assert_eq!(row.get_by_name("missing").unwrap(), None);

        pool.close().await.unwrap();
    }
}

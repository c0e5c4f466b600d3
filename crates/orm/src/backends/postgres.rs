//! PostgreSQL Backend Implementation
//!
//! PostgreSQL implementation of the backend traits on top of sqlx.

use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{Column, Pool, Postgres, Row as SqlxRow, TypeInfo, ValueRef};
use crate::error::{StoreError, StoreResult};
use super::core::*;

/// PostgreSQL database backend implementation
#[derive(Debug, Default)]
pub struct PostgresBackend;

impl PostgresBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseBackend for PostgresBackend {
    async fn create_pool(&self, database_url: &str, config: &DatabasePoolConfig) -> StoreResult<Arc<dyn DatabasePool>> {
        self.validate_database_url(database_url)?;

        let mut options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .test_before_acquire(config.test_before_acquire);

        if let Some(idle_timeout) = config.idle_timeout_seconds {
            options = options.idle_timeout(Duration::from_secs(idle_timeout));
        }

        if let Some(max_lifetime) = config.max_lifetime_seconds {
            options = options.max_lifetime(Duration::from_secs(max_lifetime));
        }

        let sqlx_pool = options.connect(database_url).await.map_err(|e| {
            tracing::error!("Failed to create PostgreSQL pool: {}", e);
            StoreError::Connection(format!("Failed to create PostgreSQL pool: {}", e))
        })?;

        Ok(Arc::new(PostgresPool::new(Arc::new(sqlx_pool))))
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::PostgreSQL
    }

    fn backend_type(&self) -> crate::backends::DatabaseBackendType {
        crate::backends::DatabaseBackendType::PostgreSQL
    }

    fn validate_database_url(&self, url: &str) -> StoreResult<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| StoreError::Configuration(format!("Invalid database URL: {}", e)))?;

        if parsed.scheme() != "postgresql" && parsed.scheme() != "postgres" {
            return Err(StoreError::Configuration("Invalid PostgreSQL URL scheme".to_string()));
        }
        if parsed.host_str().is_none() {
            return Err(StoreError::Configuration("Missing host in database URL".to_string()));
        }
        if parsed.path().trim_start_matches('/').is_empty() {
            return Err(StoreError::Configuration("Missing database name in URL".to_string()));
        }
        Ok(())
    }
}

/// PostgreSQL connection pool implementation
pub struct PostgresPool {
    pool: Arc<Pool<Postgres>>,
}

impl PostgresPool {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }
}

fn bind_all<'q>(sql: &'q str, params: &[DatabaseValue]) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    params.iter().fold(sqlx::query(sql), bind_database_value)
}

#[async_trait]
impl DatabasePool for PostgresPool {
    async fn execute(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<u64> {
        let result = bind_all(sql, params).execute(&*self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Vec<Box<dyn DatabaseRow>>> {
        let rows = bind_all(sql, params).fetch_all(&*self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| Box::new(PostgresRow::new(row)) as Box<dyn DatabaseRow>)
            .collect())
    }

    async fn fetch_optional(&self, sql: &str, params: &[DatabaseValue]) -> StoreResult<Option<Box<dyn DatabaseRow>>> {
        let row = bind_all(sql, params).fetch_optional(&*self.pool).await?;
        Ok(row.map(|r| Box::new(PostgresRow::new(r)) as Box<dyn DatabaseRow>))
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

/// PostgreSQL row implementation
pub struct PostgresRow {
    row: PgRow,
}

impl PostgresRow {
    pub fn new(row: PgRow) -> Self {
        Self { row }
    }
}

impl DatabaseRow for PostgresRow {
    fn get_by_index(&self, index: usize) -> StoreResult<DatabaseValue> {
        postgres_value_to_database_value(&self.row, index)
    }

    fn get_by_name(&self, name: &str) -> StoreResult<Option<DatabaseValue>> {
        match self.row.columns().iter().position(|col| col.name() == name) {
            Some(index) => postgres_value_to_database_value(&self.row, index).map(Some),
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

/// Bind a DatabaseValue to a sqlx query
fn bind_database_value<'q>(
    query: sqlx::query::Query<'q, Postgres, PgArguments>,
    value: &DatabaseValue,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match value {
        DatabaseValue::Null => query.bind(Option::<String>::None),
        DatabaseValue::Bool(b) => query.bind(*b),
        DatabaseValue::Int64(i) => query.bind(*i),
        DatabaseValue::Float64(f) => query.bind(*f),
        DatabaseValue::String(s) => query.bind(s.clone()),
        DatabaseValue::DateTime(dt) => query.bind(*dt),
    }
}

/// Convert a PostgreSQL column value to DatabaseValue
fn postgres_value_to_database_value(row: &PgRow, index: usize) -> StoreResult<DatabaseValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(DatabaseValue::Null);
    }

    let type_name = row.columns()[index].type_info().name().to_string();
    let value = match type_name.as_str() {
        "BOOL" => DatabaseValue::Bool(row.try_get(index)?),
        "INT2" => DatabaseValue::Int64(i64::from(row.try_get::<i16, _>(index)?)),
        "INT4" => DatabaseValue::Int64(i64::from(row.try_get::<i32, _>(index)?)),
        "INT8" => DatabaseValue::Int64(row.try_get(index)?),
        "FLOAT4" => DatabaseValue::Float64(f64::from(row.try_get::<f32, _>(index)?)),
        "FLOAT8" => DatabaseValue::Float64(row.try_get(index)?),
        "TIMESTAMPTZ" => DatabaseValue::DateTime(row.try_get(index)?),
        "TIMESTAMP" => {
            let naive: chrono::NaiveDateTime = row.try_get(index)?;
            DatabaseValue::DateTime(naive.and_utc())
        }
        _ => {
            let value: String = row.try_get(index).map_err(|e| {
                StoreError::Serialization(format!(
                    "Failed to get value as string for type '{}': {}",
                    type_name, e
                ))
            })?;
            DatabaseValue::String(value)
        }
    };
    Ok(value)
}

//! Database handle
//!
//! Owns the connection pool for one backend. Stores are handed out from it
//! and share the pool; dropping every store does not close the pool, only
//! [`Database::close`] does.

use std::sync::Arc;
use std::time::Duration;

use crate::backends::{DatabaseBackendType, DatabasePool, DatabasePoolStats, SqlDialect};
use crate::config::DatabaseConfig;
use crate::error::StoreResult;
use crate::model::Entity;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct Database {
    pool: Arc<dyn DatabasePool>,
    dialect: SqlDialect,
    backend_type: DatabaseBackendType,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("backend", &self.backend_type)
            .field("stats", &self.pool.stats())
            .finish()
    }
}

impl Database {
    /// Validate the configuration, pick the backend from the URL scheme and
    /// open a pool.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        config.validate()?;
        let backend_type = config.backend_type()?;
        let backend = backend_type.backend();
        backend.validate_database_url(&config.database_url)?;

        let pool_config = config.pool_config();
        tracing::debug!(
            "Creating {} pool with config: max={}, min={}, timeout={}s, idle_timeout={:?}s, max_lifetime={:?}s",
            backend_type,
            pool_config.max_connections,
            pool_config.min_connections,
            pool_config.acquire_timeout_seconds,
            pool_config.idle_timeout_seconds,
            pool_config.max_lifetime_seconds
        );

        let pool = backend
            .create_pool(&config.database_url, &pool_config)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                e
            })?;

        tracing::info!("{} pool created with {} max connections", backend_type, pool_config.max_connections);
        Ok(Self::from_pool(pool, backend.sql_dialect(), backend_type))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: Arc<dyn DatabasePool>, dialect: SqlDialect, backend_type: DatabaseBackendType) -> Self {
        Self {
            pool,
            dialect,
            backend_type,
        }
    }

    /// Record store for entity type `E`
    pub fn store<E: Entity>(&self) -> RecordStore<E> {
        RecordStore::new(Arc::clone(&self.pool), self.dialect)
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    pub fn pool(&self) -> Arc<dyn DatabasePool> {
        Arc::clone(&self.pool)
    }

    pub fn stats(&self) -> DatabasePoolStats {
        self.pool.stats()
    }

    /// Round-trip a trivial query and report how long it took
    pub async fn health_check(&self) -> StoreResult<Duration> {
        let elapsed = self.pool.health_check().await?;
        tracing::debug!("Database health check passed in {:?}", elapsed);
        Ok(elapsed)
    }

    /// Run a statement without parameters, typically DDL
    pub async fn execute_raw(&self, sql: &str) -> StoreResult<u64> {
        tracing::debug!("Executing raw statement: {}", sql);
        self.pool.execute(sql, &[]).await
    }

    /// Close the pool. Stores created from this handle fail afterwards.
    pub async fn close(&self) -> StoreResult<()> {
        self.pool.close().await?;
        tracing::info!("{} pool closed", self.backend_type);
        Ok(())
    }
}

//! Generic record store
//!
//! One `RecordStore<E>` serves every entity type. Each operation builds a
//! single statement through [`QueryBuilder`], runs it as one backend round
//! trip and reclassifies backend failures: writes surface as
//! `StoreError::Persistence`, reads as `StoreError::Query`.

pub mod read;
pub mod update_sql;
pub mod write;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::backends::{DatabasePool, DatabaseRow, DatabaseValue, SqlDialect};
use crate::error::StoreResult;
use crate::model::Entity;
use crate::query::QueryBuilder;

pub use update_sql::{update_sql_string, update_sql_vals};

/// Typed data access for one entity type
pub struct RecordStore<E: Entity> {
    pool: Arc<dyn DatabasePool>,
    dialect: SqlDialect,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for RecordStore<E> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            dialect: self.dialect,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for RecordStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("table", &E::table_name())
            .field("dialect", &self.dialect)
            .finish()
    }
}

impl<E: Entity> RecordStore<E> {
    pub fn new(pool: Arc<dyn DatabasePool>, dialect: SqlDialect) -> Self {
        Self {
            pool,
            dialect,
            _entity: PhantomData,
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// SELECT builder over this entity's table
    fn select(&self) -> QueryBuilder<E> {
        QueryBuilder::new().from(E::table_name())
    }

    async fn run_execute(&self, builder: QueryBuilder<E>, operation: &str) -> StoreResult<u64> {
        let (sql, params) = builder.to_sql_with_params(self.dialect);
        tracing::debug!("{} {}: {} ({} params)", operation, E::table_name(), sql, params.len());

        self.pool.execute(&sql, &params).await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", operation, E::table_name(), e);
            e.into_persistence()
        })
    }

    async fn run_fetch_all(&self, builder: QueryBuilder<E>, operation: &str) -> StoreResult<Vec<E>> {
        let (sql, params) = builder.to_sql_with_params(self.dialect);
        tracing::debug!("{} {}: {} ({} params)", operation, E::table_name(), sql, params.len());

        let rows = self.pool.fetch_all(&sql, &params).await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", operation, E::table_name(), e);
            e.into_query()
        })?;

        rows.iter().map(|row| E::from_database_row(row.as_ref())).collect()
    }

    async fn run_fetch_optional(
        &self,
        builder: QueryBuilder<E>,
        operation: &str,
        on_error: fn(crate::error::StoreError) -> crate::error::StoreError,
    ) -> StoreResult<Option<Box<dyn DatabaseRow>>> {
        let (sql, params) = builder.to_sql_with_params(self.dialect);
        tracing::debug!("{} {}: {} ({} params)", operation, E::table_name(), sql, params.len());

        self.pool.fetch_optional(&sql, &params).await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", operation, E::table_name(), e);
            on_error(e)
        })
    }
}

/// Resolve a key column and its value into an equality filter
fn key_filter<E: Entity>(
    builder: QueryBuilder<E>,
    key_field: &str,
    key_value: DatabaseValue,
) -> StoreResult<QueryBuilder<E>> {
    Ok(builder.where_eq(E::resolve_column(key_field)?, key_value))
}

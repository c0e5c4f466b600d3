//! Create, update and delete

use std::collections::HashSet;

use super::{key_filter, RecordStore};
use crate::backends::{DatabaseRowExt, DatabaseValue};
use crate::error::{StoreError, StoreResult};
use crate::model::{Entity, EntityId};
use crate::query::QueryBuilder;

impl<E: Entity> RecordStore<E> {
    /// Insert every declared field that holds a value and record the
    /// identifier the backend assigns.
    pub async fn create(&self, entity: &mut E) -> StoreResult<()> {
        self.insert(entity, &HashSet::new()).await
    }

    /// Insert while leaving the named fields and the audit timestamp columns
    /// to their column defaults.
    pub async fn create_omit_columns(&self, entity: &mut E, columns: &[&str]) -> StoreResult<()> {
        let mut omitted: HashSet<&'static str> = E::audit_columns().iter().copied().collect();
        for &name in columns {
            match E::audit_columns().iter().find(|audit| **audit == name) {
                Some(audit) => omitted.insert(*audit),
                None => omitted.insert(E::field(name)?.column),
            };
        }
        self.insert(entity, &omitted).await
    }

    async fn insert(&self, entity: &mut E, omitted: &HashSet<&'static str>) -> StoreResult<()> {
        let pk = E::primary_key_name();
        let mut builder = QueryBuilder::<E>::new().insert_into(E::table_name());

        if let Some(id) = entity.primary_key() {
            builder = builder.set(pk, id);
        }
        // NULLs are left to the column default
        for (column, value) in entity.column_values() {
            if !value.is_null() && !omitted.contains(column) && !E::audit_columns().contains(&column) {
                builder = builder.set(column, value);
            }
        }

        let row = self
            .run_fetch_optional(builder.returning(pk), "create", StoreError::into_persistence)
            .await?
            .ok_or_else(|| StoreError::Persistence(format!("insert into {} returned no identifier", E::table_name())))?;

        let id = row
            .optional_integer(pk)?
            .ok_or(StoreError::MissingPrimaryKey)?;
        entity.set_primary_key(id);

        tracing::debug!("Created {} with {} = {}", E::table_name(), pk, id);
        Ok(())
    }

    /// Write every non-zero field to the rows whose `key_field` equals
    /// `key_value`. Returns the number of rows affected.
    pub async fn update<V: Into<DatabaseValue>>(&self, entity: &E, key_field: &str, key_value: V) -> StoreResult<u64> {
        let assignments: Vec<(&'static str, DatabaseValue)> = entity
            .column_values()
            .into_iter()
            .filter(|(_, value)| !value.is_zero())
            .collect();

        let builder = key_filter(QueryBuilder::<E>::new().update(E::table_name()), key_field, key_value.into())?;
        if assignments.is_empty() {
            return Err(StoreError::EmptyUpdate { entity: E::table_name() });
        }

        let builder = assignments
            .into_iter()
            .fold(builder, |builder, (column, value)| builder.set(column, value));
        self.run_execute(builder, "update").await
    }

    /// `update` keyed on the identifier column
    pub async fn update_patch(&self, entity: &E, id: EntityId) -> StoreResult<u64> {
        self.update(entity, E::primary_key_name(), id).await
    }

    /// Delete the rows whose `key_field` equals `key_value`
    pub async fn delete<V: Into<DatabaseValue>>(&self, key_field: &str, key_value: V) -> StoreResult<u64> {
        let builder = key_filter(QueryBuilder::<E>::new().delete_from(E::table_name()), key_field, key_value.into())?;
        self.run_execute(builder, "delete").await
    }
}

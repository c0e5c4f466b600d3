//! Textual UPDATE statement builder
//!
//! Produces a literal `UPDATE` string from an entity and a list of field
//! names for callers that hand SQL to another tool. Nothing here touches the
//! backend. Literals are escaped by doubling single quotes; everywhere else
//! the store binds parameters instead.

use super::RecordStore;
use crate::backends::DatabaseValue;
use crate::error::{StoreError, StoreResult};
use crate::model::{fields::quote_literal, Entity};

/// Comma-joined `column = literal` fragments for the named fields.
///
/// Text fields are emitted only when non-empty, integer and reference fields
/// only when non-zero. Floats, booleans and timestamps are always emitted.
pub fn update_sql_vals<E: Entity>(entity: &E, fields: &[&str]) -> StoreResult<String> {
    let mut fragments = Vec::with_capacity(fields.len());

    for name in fields {
        let field = E::field(name)?;
        let value = entity.field_value(field.name).unwrap_or(DatabaseValue::Null);

        if field.kind.skips_when_empty() && value.is_zero() {
            continue;
        }
        fragments.push(format!("{} = {}", field.column, field.kind.literal(&value)));
    }

    if fragments.is_empty() {
        return Err(StoreError::EmptyUpdate { entity: E::table_name() });
    }
    Ok(fragments.join(", "))
}

/// Full `UPDATE {table} SET ... WHERE {key} = {value}` statement. Integer key
/// values are written bare, anything else is quoted.
pub fn update_sql_string<E: Entity>(
    entity: &E,
    fields: &[&str],
    table: &str,
    key_field: &str,
    key_value: &DatabaseValue,
) -> StoreResult<String> {
    let assignments = update_sql_vals(entity, fields)?;
    let key_literal = match key_value {
        DatabaseValue::Int64(value) => value.to_string(),
        other => quote_literal(&other.to_string()),
    };
    Ok(format!("UPDATE {} SET {} WHERE {} = {}", table, assignments, key_field, key_literal))
}

impl<E: Entity> RecordStore<E> {
    pub fn update_sql_vals(&self, entity: &E, fields: &[&str]) -> StoreResult<String> {
        update_sql_vals(entity, fields)
    }

    pub fn update_sql_string(
        &self,
        entity: &E,
        fields: &[&str],
        table: &str,
        key_field: &str,
        key_value: &DatabaseValue,
    ) -> StoreResult<String> {
        update_sql_string(entity, fields, table, key_field, key_value)
    }
}

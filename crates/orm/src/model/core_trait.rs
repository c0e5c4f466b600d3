//! Core Entity Trait - capability contract for persisted records
//!
//! An entity exposes its table, its identifier, a declarative field table and
//! a by-name value accessor. Everything the store does (insert payloads,
//! partial updates, predicate validation, the textual update builder) is
//! driven from those four pieces instead of runtime reflection.

use std::fmt::Debug;

use crate::backends::{DatabaseRow, DatabaseValue};
use crate::error::{StoreError, StoreResult};
use crate::model::fields::FieldDef;

/// Identifier type assigned by the backend on insert
pub type EntityId = i64;

/// Core trait for records persisted through a `RecordStore`
pub trait Entity: Send + Sync + Debug + Sized {
    /// Table name for this entity
    fn table_name() -> &'static str;

    /// Identifier column name
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Identifier of this instance, `None` until the store assigns one
    fn primary_key(&self) -> Option<EntityId>;

    /// Record the identifier assigned by the backend
    fn set_primary_key(&mut self, key: EntityId);

    /// Declared value fields, identifier excluded
    fn fields() -> &'static [FieldDef];

    /// Current value of the field with the given logical name
    fn field_value(&self, name: &str) -> Option<DatabaseValue>;

    /// Audit timestamp columns left to backend defaults on insert
    fn audit_columns() -> &'static [&'static str] {
        &["create_time", "update_time"]
    }

    /// Build an instance from a result row
    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self>;

    /// Look up a declared field by logical or column name
    fn field(name: &str) -> StoreResult<&'static FieldDef> {
        Self::fields()
            .iter()
            .find(|field| field.name == name || field.column == name)
            .ok_or_else(|| StoreError::field_not_found(Self::table_name(), name))
    }

    /// Resolve a caller-supplied name to a column, accepting the identifier
    fn resolve_column(name: &str) -> StoreResult<&'static str> {
        if name == Self::primary_key_name() {
            return Ok(Self::primary_key_name());
        }
        Self::field(name).map(|field| field.column)
    }

    /// Column/value pairs for every declared field, in declaration order
    fn column_values(&self) -> Vec<(&'static str, DatabaseValue)> {
        Self::fields()
            .iter()
            .map(|field| {
                let value = self.field_value(field.name).unwrap_or(DatabaseValue::Null);
                (field.column, value)
            })
            .collect()
    }
}

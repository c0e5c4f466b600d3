//! Query Builder DML operations (INSERT, UPDATE, DELETE)

use super::builder::QueryBuilder;
use super::types::*;
use crate::backends::DatabaseValue;

impl<M> QueryBuilder<M> {
    /// Start an INSERT query
    pub fn insert_into(mut self, table: &str) -> Self {
        self.query_type = QueryType::Insert;
        self.table = Some(table.to_string());
        self
    }

    /// Start an UPDATE query
    pub fn update(mut self, table: &str) -> Self {
        self.query_type = QueryType::Update;
        self.table = Some(table.to_string());
        self
    }

    /// Start a DELETE query
    pub fn delete_from(mut self, table: &str) -> Self {
        self.query_type = QueryType::Delete;
        self.table = Some(table.to_string());
        self
    }

    /// Set a column value (for INSERT/UPDATE)
    pub fn set<T: Into<DatabaseValue>>(mut self, column: &str, value: T) -> Self {
        self.set_clauses.push(SetClause {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Return a column from an INSERT
    pub fn returning(mut self, column: &str) -> Self {
        self.returning = Some(column.to_string());
        self
    }
}

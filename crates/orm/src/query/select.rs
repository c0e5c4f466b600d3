//! Query Builder SELECT operations

use super::builder::QueryBuilder;
use super::types::QueryType;

impl<M> QueryBuilder<M> {
    /// Add a SELECT field; repeated fields are kept once
    pub fn select(mut self, field: &str) -> Self {
        if !self.select_fields.iter().any(|existing| existing == field) {
            self.select_fields.push(field.to_string());
        }
        self
    }

    /// Set the FROM table
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Turn the statement into `SELECT COUNT(*)`
    pub fn count(mut self) -> Self {
        self.query_type = QueryType::Count;
        self
    }
}

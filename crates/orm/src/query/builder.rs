//! Query Builder - Core builder implementation

use std::marker::PhantomData;

use super::types::*;

/// Builder for one statement against one table.
///
/// Every method consumes and returns the builder, so a statement is composed
/// in a single visible chain rather than by mutating a shared handle.
#[derive(Debug)]
pub struct QueryBuilder<M = ()> {
    pub(crate) query_type: QueryType,
    pub(crate) table: Option<String>,
    pub(crate) select_fields: Vec<String>,
    pub(crate) set_clauses: Vec<SetClause>,
    pub(crate) where_clauses: Vec<WhereClause>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<u64>,
    pub(crate) offset_value: Option<u64>,
    pub(crate) returning: Option<String>,
    _phantom: PhantomData<M>,
}

impl<M> Clone for QueryBuilder<M> {
    fn clone(&self) -> Self {
        Self {
            query_type: self.query_type,
            table: self.table.clone(),
            select_fields: self.select_fields.clone(),
            set_clauses: self.set_clauses.clone(),
            where_clauses: self.where_clauses.clone(),
            order_by: self.order_by.clone(),
            limit_count: self.limit_count,
            offset_value: self.offset_value,
            returning: self.returning.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<M> Default for QueryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> QueryBuilder<M> {
    /// Create a new query builder
    pub fn new() -> Self {
        Self {
            query_type: QueryType::Select,
            table: None,
            select_fields: Vec::new(),
            set_clauses: Vec::new(),
            where_clauses: Vec::new(),
            order_by: Vec::new(),
            limit_count: None,
            offset_value: None,
            returning: None,
            _phantom: PhantomData,
        }
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn limit_count(&self) -> Option<u64> {
        self.limit_count
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset_value
    }
}

//! Per-call query options
//!
//! `QueryOptions` is a value built up front and handed to a finder. Several
//! options may be passed to one call; each is applied on its own and they
//! accumulate: predicates AND together, sort keys append, selected fields
//! union and the smallest limit wins.

use super::builder::QueryBuilder;
use super::types::OrderDirection;
use crate::backends::DatabaseValue;
use crate::error::StoreResult;
use crate::model::Entity;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    select: Vec<String>,
    order: Vec<(String, OrderDirection)>,
    filters: Vec<(String, DatabaseValue)>,
    limit: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the columns fetched. Unselected fields decode to their zero value.
    pub fn select(mut self, field: &str) -> Self {
        self.select.push(field.to_string());
        self
    }

    pub fn order_by(self, field: &str) -> Self {
        self.order_by_direction(field, OrderDirection::Asc)
    }

    pub fn order_by_desc(self, field: &str) -> Self {
        self.order_by_direction(field, OrderDirection::Desc)
    }

    pub fn order_by_direction(mut self, field: &str, direction: OrderDirection) -> Self {
        self.order.push((field.to_string(), direction));
        self
    }

    /// Equality predicate
    pub fn filter<T: Into<DatabaseValue>>(mut self, field: &str, value: T) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(match self.limit {
            Some(current) => current.min(count),
            None => count,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_empty() && self.order.is_empty() && self.filters.is_empty() && self.limit.is_none()
    }

    /// Apply these options to a builder, resolving every field name against
    /// the entity's declared fields.
    pub fn apply<E: Entity>(&self, mut builder: QueryBuilder<E>) -> StoreResult<QueryBuilder<E>> {
        for field in &self.select {
            builder = builder.select(E::resolve_column(field)?);
        }
        for (field, direction) in &self.order {
            builder = builder.order_by_direction(E::resolve_column(field)?, *direction);
        }
        for (field, value) in &self.filters {
            builder = builder.where_eq(E::resolve_column(field)?, value.clone());
        }
        if let Some(limit) = self.limit {
            builder = builder.limit(limit);
        }
        Ok(builder)
    }

    /// Apply a sequence of options in order.
    pub fn apply_all<E: Entity>(options: &[QueryOptions], builder: QueryBuilder<E>) -> StoreResult<QueryBuilder<E>> {
        options.iter().try_fold(builder, |builder, option| option.apply(builder))
    }
}

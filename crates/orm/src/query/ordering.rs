//! Query Builder ORDER BY operations

use super::builder::QueryBuilder;
use super::types::*;

impl<M> QueryBuilder<M> {
    /// Add ORDER BY clause (ascending)
    pub fn order_by(self, column: &str) -> Self {
        self.order_by_direction(column, OrderDirection::Asc)
    }

    /// Add ORDER BY clause (descending)
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by_direction(column, OrderDirection::Desc)
    }

    pub fn order_by_direction(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order_by.push((column.to_string(), direction));
        self
    }
}

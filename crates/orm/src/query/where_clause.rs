//! Query Builder WHERE clause operations

use super::builder::QueryBuilder;
use super::types::*;
use crate::backends::DatabaseValue;

impl<M> QueryBuilder<M> {
    /// Add WHERE condition with equality
    pub fn where_eq<T: Into<DatabaseValue>>(self, column: &str, value: T) -> Self {
        self.where_condition(column, QueryOperator::Equal, value)
    }

    /// Add WHERE condition with LIKE
    pub fn where_like(self, column: &str, pattern: &str) -> Self {
        self.where_condition(column, QueryOperator::Like, pattern)
    }

    /// Add WHERE condition with an explicit operator
    pub fn where_condition<T: Into<DatabaseValue>>(
        mut self,
        column: &str,
        operator: QueryOperator,
        value: T,
    ) -> Self {
        self.where_clauses
            .push(WhereClause::Condition(WhereCondition::new(column, operator, value)));
        self
    }

    /// Add a parenthesised group of conditions; empty groups are ignored
    pub fn where_group(mut self, combinator: Combinator, conditions: Vec<WhereCondition>) -> Self {
        if !conditions.is_empty() {
            self.where_clauses.push(WhereClause::Group { combinator, conditions });
        }
        self
    }

    /// Add a prepared clause; empty groups are ignored
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        match clause {
            WhereClause::Group { ref conditions, .. } if conditions.is_empty() => {}
            clause => self.where_clauses.push(clause),
        }
        self
    }
}

//! Query Builder Types - Core types and enums for query building

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::backends::DatabaseValue;
use crate::error::{StoreError, StoreResult};

/// Comparison operators accepted in predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Substring match, the value is wrapped in `%`
    Like,
}

impl QueryOperator {
    /// Parse an operator as written in a predicate-operator map
    pub fn parse(field: &str, operator: &str) -> StoreResult<Self> {
        match operator.trim().to_lowercase().as_str() {
            "=" => Ok(QueryOperator::Equal),
            ">" => Ok(QueryOperator::GreaterThan),
            ">=" => Ok(QueryOperator::GreaterThanOrEqual),
            "<" => Ok(QueryOperator::LessThan),
            "<=" => Ok(QueryOperator::LessThanOrEqual),
            "like" => Ok(QueryOperator::Like),
            _ => Err(StoreError::InvalidOperator {
                field: field.to_string(),
                operator: operator.to_string(),
            }),
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::Like => write!(f, "LIKE"),
        }
    }
}

/// How the conditions of a group are joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combinator {
    #[default]
    Or,
    And,
}

impl Combinator {
    pub fn parse(value: &str) -> StoreResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "or" => Ok(Combinator::Or),
            "and" => Ok(Combinator::And),
            _ => Err(StoreError::InvalidOperator {
                field: super::search::SEARCH_COMBINATOR_KEY.to_string(),
                operator: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Or => write!(f, "OR"),
            Combinator::And => write!(f, "AND"),
        }
    }
}

/// Single `column <op> value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    pub column: String,
    pub operator: QueryOperator,
    pub value: DatabaseValue,
    /// Compare the column's text form, for `LIKE` on non-text columns
    pub cast_to_text: bool,
}

impl WhereCondition {
    pub fn new<T: Into<DatabaseValue>>(column: &str, operator: QueryOperator, value: T) -> Self {
        Self {
            column: column.to_string(),
            operator,
            value: value.into(),
            cast_to_text: false,
        }
    }

    pub fn cast_to_text(mut self) -> Self {
        self.cast_to_text = true;
        self
    }
}

/// Top-level WHERE entry; entries are AND-ed together
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    Condition(WhereCondition),
    /// Parenthesised group joined by its own combinator
    Group {
        combinator: Combinator,
        conditions: Vec<WhereCondition>,
    },
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Statement types supported by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Count,
    Insert,
    Update,
    Delete,
}

/// Set clause for UPDATE and INSERT operations
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub column: String,
    pub value: DatabaseValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parsing() {
        assert_eq!(QueryOperator::parse("price", ">").unwrap(), QueryOperator::GreaterThan);
        assert_eq!(QueryOperator::parse("price", "<=").unwrap(), QueryOperator::LessThanOrEqual);
        assert_eq!(QueryOperator::parse("name", "LIKE").unwrap(), QueryOperator::Like);
        assert_eq!(QueryOperator::parse("name", " like ").unwrap(), QueryOperator::Like);

        let err = QueryOperator::parse("name", "; DROP TABLE").unwrap_err();
        assert!(matches!(err, StoreError::InvalidOperator { .. }));
    }

    #[test]
    fn test_combinator_parsing() {
        assert_eq!(Combinator::default(), Combinator::Or);
        assert_eq!(Combinator::parse("AND").unwrap(), Combinator::And);
        assert!(Combinator::parse("xor").is_err());
    }
}

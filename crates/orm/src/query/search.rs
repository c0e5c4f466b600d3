//! Predicate maps and dynamic search composition

use std::collections::BTreeMap;

use super::builder::QueryBuilder;
use super::types::{Combinator, QueryOperator, WhereClause, WhereCondition};
use crate::backends::DatabaseValue;
use crate::error::StoreResult;
use crate::model::{Entity, FieldKind};

/// Reserved key in a string operator map selecting how search fragments combine
pub const SEARCH_COMBINATOR_KEY: &str = "searchKeyOpt";

/// Field name to comparison value
pub type Predicates = BTreeMap<String, DatabaseValue>;

/// Build a predicate map from `(field, value)` pairs
pub fn predicates<I, K, V>(pairs: I) -> Predicates
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<DatabaseValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Per-field search operators plus the combination mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOperators {
    operators: BTreeMap<String, QueryOperator>,
    combinator: Combinator,
}

impl SearchOperators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operator(mut self, field: &str, operator: QueryOperator) -> Self {
        self.operators.insert(field.to_string(), operator);
        self
    }

    pub fn combine_with(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Parse a string map such as `{"price": ">=", "name": "like",
    /// "searchKeyOpt": "and"}`.
    pub fn from_map<I, K, V>(entries: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut operators = Self::new();
        for (field, operator) in entries {
            let (field, operator) = (field.as_ref(), operator.as_ref());
            if field == SEARCH_COMBINATOR_KEY {
                operators.combinator = Combinator::parse(operator)?;
            } else {
                operators
                    .operators
                    .insert(field.to_string(), QueryOperator::parse(field, operator)?);
            }
        }
        Ok(operators)
    }

    pub fn operator_for(&self, field: &str) -> Option<QueryOperator> {
        self.operators.get(field).copied()
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Compose the search group for `predicates`: one parenthesised group of
    /// fragments joined by the combinator. Fields without an operator, and
    /// `like` fields, match on substring.
    pub fn compose<E: Entity>(&self, predicates: &Predicates) -> StoreResult<Option<WhereClause>> {
        let mut conditions = Vec::with_capacity(predicates.len());

        for (field, value) in predicates {
            let column = E::resolve_column(field)?;
            let operator = self.operator_for(field).unwrap_or(QueryOperator::Like);
            let condition = match operator {
                QueryOperator::Like => {
                    let condition = WhereCondition::new(column, operator, format!("%{}%", value));
                    if column_kind::<E>(field)? == FieldKind::Text {
                        condition
                    } else {
                        condition.cast_to_text()
                    }
                }
                _ => WhereCondition::new(column, operator, value.clone()),
            };
            conditions.push(condition);
        }

        if conditions.is_empty() {
            return Ok(None);
        }
        Ok(Some(WhereClause::Group {
            combinator: self.combinator,
            conditions,
        }))
    }
}

/// Kind of a searchable name; the identifier column counts as an integer
fn column_kind<E: Entity>(name: &str) -> StoreResult<FieldKind> {
    if name == E::primary_key_name() {
        return Ok(FieldKind::Integer);
    }
    E::field(name).map(|field| field.kind)
}

/// AND an equality condition for every predicate onto `builder`
pub fn apply_exact<E: Entity>(builder: QueryBuilder<E>, predicates: &Predicates) -> StoreResult<QueryBuilder<E>> {
    predicates.iter().try_fold(builder, |builder, (field, value)| {
        Ok(builder.where_eq(E::resolve_column(field)?, value.clone()))
    })
}

/// AND the composed search group onto `builder`
pub fn apply_search<E: Entity>(
    builder: QueryBuilder<E>,
    predicates: &Predicates,
    operators: &SearchOperators,
) -> StoreResult<QueryBuilder<E>> {
    Ok(match operators.compose::<E>(predicates)? {
        Some(clause) => builder.where_clause(clause),
        None => builder,
    })
}

//! Query Builder Module - fluent statement builder plus the per-call option,
//! search and pagination inputs the record store composes into it.

pub mod builder;
pub mod dml;
pub mod options;
pub mod ordering;
pub mod pagination;
pub mod search;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use options::QueryOptions;
pub use pagination::Page;
pub use search::{apply_exact, apply_search, predicates, Predicates, SearchOperators, SEARCH_COMBINATOR_KEY};
pub use types::{Combinator, OrderDirection, QueryOperator, QueryType, SetClause, WhereClause, WhereCondition};

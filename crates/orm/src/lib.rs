//! # gadget-orm: generic record store
//!
//! One reusable data-access layer for every entity of the gadget loyalty
//! backend. Entities declare their fields once (see [`model::FieldDef`]);
//! [`RecordStore`] turns that table into inserts, partial updates, keyed
//! lookups, paginated listings and composed searches over PostgreSQL or
//! SQLite.
//!
//! ```no_run
//! # async fn demo() -> gadget_orm::StoreResult<()> {
//! use gadget_orm::{Database, DatabaseConfig};
//!
//! let db = Database::connect(&DatabaseConfig::new("sqlite::memory:")).await?;
//! db.health_check().await?;
//! db.close().await
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;


pub use backends::{DatabaseBackendType, DatabasePool, DatabaseRow, DatabaseRowExt, DatabaseValue, SqlDialect};
pub use config::{ConfigError, DatabaseConfig};
pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use logging::{init_logging, LoggingConfig};
pub use model::{Entity, EntityId, FieldDef, FieldKind};
pub use query::{
    predicates, Combinator, OrderDirection, Page, Predicates, QueryBuilder, QueryOperator, QueryOptions,
    SearchOperators, SEARCH_COMBINATOR_KEY,
};
pub use store::{update_sql_string, update_sql_vals, RecordStore};

//! Error types for the record store
//!
//! Backends report raw failures as `Database`/`Connection`; the store
//! reclassifies them as `Persistence` (writes) or `Query` (reads) before
//! handing them to the caller. Nothing here is retried.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Backend rejected a create/update/delete
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Backend rejected a read, search or count
    #[error("Query error: {0}")]
    Query(String),

    /// A field name the entity does not declare
    #[error("Field '{field}' not found on {entity}")]
    FieldNotFound { entity: &'static str, field: String },

    /// Every requested update field held its zero value
    #[error("No non-empty fields to update on {entity}")]
    EmptyUpdate { entity: &'static str },

    #[error("Invalid pagination: page {page}, page size {page_size} (both must be at least 1)")]
    InvalidPagination { page: u32, page_size: u32 },

    #[error("Unsupported search operator '{operator}' for field '{field}'")]
    InvalidOperator { field: String, operator: String },

    /// Unclassified backend failure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Row decoding failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Primary key is missing or invalid")]
    MissingPrimaryKey,
}

impl StoreError {
    /// Reclassify a backend failure raised by a write statement.
    pub fn into_persistence(self) -> Self {
        match self {
            StoreError::Database(msg) | StoreError::Connection(msg) => StoreError::Persistence(msg),
            other => other,
        }
    }

    /// Reclassify a backend failure raised by a read statement.
    pub fn into_query(self) -> Self {
        match self {
            StoreError::Database(msg) | StoreError::Connection(msg) => StoreError::Query(msg),
            other => other,
        }
    }

    pub fn field_not_found(entity: &'static str, field: &str) -> Self {
        StoreError::FieldNotFound {
            entity,
            field: field.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connection(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_are_reclassified() {
        let err = StoreError::Database("unique constraint".to_string());
        assert_eq!(
            err.clone().into_persistence(),
            StoreError::Persistence("unique constraint".to_string())
        );
        assert_eq!(err.into_query(), StoreError::Query("unique constraint".to_string()));

        let conn = StoreError::Connection("refused".to_string());
        assert_eq!(conn.into_query(), StoreError::Query("refused".to_string()));
    }

    #[test]
    fn test_usage_errors_survive_reclassification() {
        let err = StoreError::field_not_found("products", "colour");
        assert_eq!(err.clone().into_persistence(), err);

        let empty = StoreError::EmptyUpdate { entity: "products" };
        assert_eq!(empty.clone().into_query(), empty);
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::field_not_found("customers", "nickname");
        assert_eq!(err.to_string(), "Field 'nickname' not found on customers");

        let err = StoreError::InvalidPagination { page: 0, page_size: 10 };
        assert!(err.to_string().contains("page 0"));
    }
}

//! Declarative field tables
//!
//! Each entity lists its fields once, as a `const` slice of [`FieldDef`].
//! The kind carries the zero-value rule and the literal formatting used by
//! the textual update builder, and the column type used for schema creation.

use crate::backends::{DatabaseValue, SqlDialect};

/// Value kind of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
    /// Identifier of a row in another table
    Reference,
}

impl FieldKind {
    /// Whether the textual update builder drops this field when it holds its
    /// zero value. Only text and integer-like fields are skipped.
    pub fn skips_when_empty(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Integer | FieldKind::Reference)
    }

    /// Whether literals of this kind are single-quoted
    pub fn quotes_literals(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Timestamp)
    }

    /// Render a value as an inline SQL literal
    pub fn literal(&self, value: &DatabaseValue) -> String {
        let rendered = match value {
            DatabaseValue::Null => return "NULL".to_string(),
            DatabaseValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            other => other.to_string(),
        };

        if self.quotes_literals() {
            quote_literal(&rendered)
        } else {
            rendered
        }
    }

    /// Column type used when creating tables
    pub fn sql_type(&self, dialect: SqlDialect) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Integer | FieldKind::Reference => "BIGINT",
            FieldKind::Float => dialect.float_type(),
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Timestamp => dialect.timestamp_type(),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes
pub fn quote_literal(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// One declared field: logical name, persisted column and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    /// Field whose column name equals its logical name
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, column: name, kind }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, FieldKind::Timestamp)
    }

    pub const fn reference(name: &'static str) -> Self {
        Self::new(name, FieldKind::Reference)
    }

    /// Persist under a different column name
    pub const fn with_column(self, column: &'static str) -> Self {
        Self {
            name: self.name,
            column,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_field_def_column_override() {
        const FIELD: FieldDef = FieldDef::text("kind").with_column("type");
        assert_eq!(FIELD.name, "kind");
        assert_eq!(FIELD.column, "type");
        assert_eq!(FieldDef::integer("stock").column, "stock");
    }

    #[test]
    fn test_literals() {
        assert_eq!(FieldKind::Text.literal(&"phone".into()), "'phone'");
        assert_eq!(FieldKind::Text.literal(&"O'Brien".into()), "'O''Brien'");
        assert_eq!(FieldKind::Integer.literal(&42i64.into()), "42");
        assert_eq!(FieldKind::Float.literal(&12.5.into()), "12.5");
        assert_eq!(FieldKind::Boolean.literal(&true.into()), "true");
        assert_eq!(FieldKind::Reference.literal(&DatabaseValue::Null), "NULL");

        let at = Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap();
        assert_eq!(FieldKind::Timestamp.literal(&at.into()), "'2024-01-31 08:00:00'");
    }

    #[test]
    fn test_skip_rules() {
        assert!(FieldKind::Text.skips_when_empty());
        assert!(FieldKind::Integer.skips_when_empty());
        assert!(FieldKind::Reference.skips_when_empty());
        assert!(!FieldKind::Float.skips_when_empty());
        assert!(!FieldKind::Boolean.skips_when_empty());
        assert!(!FieldKind::Timestamp.skips_when_empty());
    }
}

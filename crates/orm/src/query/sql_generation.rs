//! Query Builder SQL generation
//!
//! Values never appear in the generated text; each one becomes a
//! placeholder in the dialect's style and is returned alongside the SQL in
//! binding order.

use super::builder::QueryBuilder;
use super::types::*;
use crate::backends::{DatabaseValue, SqlDialect};

/// Accumulates bound parameters while SQL is generated
struct ParamWriter {
    dialect: SqlDialect,
    params: Vec<DatabaseValue>,
}

impl ParamWriter {
    fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    fn bind(&mut self, value: &DatabaseValue) -> String {
        let placeholder = self.dialect.parameter_placeholder(self.params.len());
        self.params.push(value.clone());
        placeholder
    }
}

impl<M> QueryBuilder<M> {
    /// Generate SQL with placeholders and return it with its parameters
    pub fn to_sql_with_params(&self, dialect: SqlDialect) -> (String, Vec<DatabaseValue>) {
        let mut writer = ParamWriter::new(dialect);
        let sql = match self.query_type {
            QueryType::Select => self.build_select_sql(&mut writer),
            QueryType::Count => self.build_count_sql(&mut writer),
            QueryType::Insert => self.build_insert_sql(&mut writer),
            QueryType::Update => self.build_update_sql(&mut writer),
            QueryType::Delete => self.build_delete_sql(&mut writer),
        };
        (sql, writer.params)
    }

    fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or_default()
    }

    /// Build SELECT SQL
    fn build_select_sql(&self, writer: &mut ParamWriter) -> String {
        let mut sql = String::from("SELECT ");

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(self.table_name());

        self.build_where_clause(&mut sql, writer);
        self.build_order_limit_clause(&mut sql, writer.dialect);
        sql
    }

    /// Build SELECT COUNT(*) SQL; sort, select and limit do not affect a count
    fn build_count_sql(&self, writer: &mut ParamWriter) -> String {
        let mut sql = format!("SELECT COUNT(*) AS count FROM {}", self.table_name());
        self.build_where_clause(&mut sql, writer);
        sql
    }

    /// Build INSERT SQL
    fn build_insert_sql(&self, writer: &mut ParamWriter) -> String {
        let mut sql = format!("INSERT INTO {}", self.table_name());

        if self.set_clauses.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            let columns: Vec<&str> = self.set_clauses.iter().map(|clause| clause.column.as_str()).collect();
            let placeholders: Vec<String> = self
                .set_clauses
                .iter()
                .map(|clause| writer.bind(&clause.value))
                .collect();
            sql.push_str(&format!(" ({}) VALUES ({})", columns.join(", "), placeholders.join(", ")));
        }

        if let Some(column) = &self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(column);
        }
        sql
    }

    /// Build UPDATE SQL
    fn build_update_sql(&self, writer: &mut ParamWriter) -> String {
        let mut sql = format!("UPDATE {} SET ", self.table_name());
        let assignments: Vec<String> = self
            .set_clauses
            .iter()
            .map(|clause| format!("{} = {}", clause.column, writer.bind(&clause.value)))
            .collect();
        sql.push_str(&assignments.join(", "));

        self.build_where_clause(&mut sql, writer);
        sql
    }

    /// Build DELETE SQL
    fn build_delete_sql(&self, writer: &mut ParamWriter) -> String {
        let mut sql = format!("DELETE FROM {}", self.table_name());
        self.build_where_clause(&mut sql, writer);
        sql
    }

    fn render_condition(condition: &WhereCondition, writer: &mut ParamWriter) -> String {
        let placeholder = writer.bind(&condition.value);
        if condition.cast_to_text {
            format!("CAST({} AS TEXT) {} {}", condition.column, condition.operator, placeholder)
        } else {
            format!("{} {} {}", condition.column, condition.operator, placeholder)
        }
    }

    /// Helper method to build WHERE clauses
    fn build_where_clause(&self, sql: &mut String, writer: &mut ParamWriter) {
        if self.where_clauses.is_empty() {
            return;
        }

        let rendered: Vec<String> = self
            .where_clauses
            .iter()
            .map(|clause| match clause {
                WhereClause::Condition(condition) => Self::render_condition(condition, writer),
                WhereClause::Group { combinator, conditions } => {
                    let parts: Vec<String> = conditions
                        .iter()
                        .map(|condition| Self::render_condition(condition, writer))
                        .collect();
                    format!("({})", parts.join(&format!(" {} ", combinator)))
                }
            })
            .collect();

        sql.push_str(" WHERE ");
        sql.push_str(&rendered.join(" AND "));
    }

    /// Helper method to build ORDER BY and LIMIT clauses
    fn build_order_limit_clause(&self, sql: &mut String, dialect: SqlDialect) {
        if !self.order_by.is_empty() {
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_clauses.join(", "));
        }

        match (self.limit_count, self.offset_value) {
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {}", limit)),
            // Both dialects need a LIMIT before OFFSET
            (None, Some(_)) => match dialect {
                SqlDialect::PostgreSQL => sql.push_str(" LIMIT ALL"),
                SqlDialect::SQLite => sql.push_str(" LIMIT -1"),
            },
            (None, None) => {}
        }

        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
    }
}

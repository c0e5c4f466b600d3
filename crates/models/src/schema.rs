//! Table creation for every entity
//!
//! Tables are derived from each entity's declared fields plus an identifier
//! column and the two audit timestamps. Existing tables are left untouched;
//! there is no column diffing.

use gadget_orm::{Database, Entity, FieldKind, SqlDialect, StoreResult};

use crate::{
    Customer, Discount, GadgetPoints, MonthlySubscription, Outlet, PointRedemption, Product, Purchase,
};

/// `CREATE TABLE IF NOT EXISTS` statement for `E`
pub fn create_table_sql<E: Entity>(dialect: SqlDialect) -> String {
    let mut columns = vec![format!("{} {}", E::primary_key_name(), dialect.auto_increment_primary_key())];

    for field in E::fields() {
        let mut column = format!("{} {}", field.column, field.kind.sql_type(dialect));
        if field.kind == FieldKind::Boolean {
            column.push_str(" NOT NULL DEFAULT FALSE");
        }
        columns.push(column);
    }

    for audit in E::audit_columns() {
        columns.push(format!(
            "{} {} DEFAULT CURRENT_TIMESTAMP",
            audit,
            dialect.timestamp_type()
        ));
    }

    format!("CREATE TABLE IF NOT EXISTS {} ({})", E::table_name(), columns.join(", "))
}

/// Statements creating every table, in dependency order
pub fn statements(dialect: SqlDialect) -> Vec<String> {
    vec![
        create_table_sql::<Outlet>(dialect),
        create_table_sql::<Product>(dialect),
        create_table_sql::<Customer>(dialect),
        create_table_sql::<Purchase>(dialect),
        create_table_sql::<GadgetPoints>(dialect),
        create_table_sql::<PointRedemption>(dialect),
        create_table_sql::<MonthlySubscription>(dialect),
        create_table_sql::<Discount>(dialect),
    ]
}

/// Create any missing table
pub async fn migrate(db: &Database) -> StoreResult<()> {
    let statements = statements(db.dialect());
    for sql in &statements {
        db.execute_raw(sql).await?;
    }
    tracing::info!("Schema ready ({} tables)", statements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_table() {
        assert_eq!(
            create_table_sql::<PointRedemption>(SqlDialect::SQLite),
            "CREATE TABLE IF NOT EXISTS point_redemptions (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             customer_id BIGINT, outlet_id BIGINT, product_id BIGINT, redemption_date DATETIME, \
             replenished BOOLEAN NOT NULL DEFAULT FALSE, create_time DATETIME DEFAULT CURRENT_TIMESTAMP, \
             update_time DATETIME DEFAULT CURRENT_TIMESTAMP)"
        );
    }

    #[test]
    fn test_postgres_table_uses_column_names() {
        let sql = create_table_sql::<Discount>(SqlDialect::PostgreSQL);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS discounts (id BIGSERIAL PRIMARY KEY, type TEXT,"));
        assert!(sql.contains("discount_amount DOUBLE PRECISION"));
        assert!(sql.contains("create_time TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_every_entity_has_a_table() {
        assert_eq!(statements(SqlDialect::SQLite).len(), 8);
    }
}

use chrono::{DateTime, Utc};
use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// A customer's order of one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub quantity: i64,
}

const PURCHASE_FIELDS: &[FieldDef] = &[
    FieldDef::reference("customer_id"),
    FieldDef::reference("product_id"),
    FieldDef::timestamp("purchase_date"),
    FieldDef::integer("quantity"),
];

impl Entity for Purchase {
    fn table_name() -> &'static str {
        "purchases"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        PURCHASE_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "customer_id" => Some(self.customer_id.into()),
            "product_id" => Some(self.product_id.into()),
            "purchase_date" => Some(self.purchase_date.into()),
            "quantity" => Some(self.quantity.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            customer_id: row.optional_integer("customer_id")?,
            product_id: row.optional_integer("product_id")?,
            purchase_date: row.timestamp("purchase_date")?,
            quantity: row.integer("quantity")?,
        })
    }
}

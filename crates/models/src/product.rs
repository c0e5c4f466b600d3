use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// Devices, accessories and store-specific gadgets offered by an outlet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet_id: Option<EntityId>,
}

const PRODUCT_FIELDS: &[FieldDef] = &[
    FieldDef::text("name"),
    FieldDef::float("price"),
    FieldDef::integer("stock"),
    FieldDef::reference("outlet_id"),
];

impl Entity for Product {
    fn table_name() -> &'static str {
        "products"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        PRODUCT_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "price" => Some(self.price.into()),
            "stock" => Some(self.stock.into()),
            "outlet_id" => Some(self.outlet_id.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            name: row.text("name")?,
            price: row.float("price")?,
            stock: row.integer("stock")?,
            outlet_id: row.optional_integer("outlet_id")?,
        })
    }
}

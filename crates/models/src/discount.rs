use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// A discount attached to a product.
///
/// `kind` names the scheme (national, member or store discount). At checkout
/// the amount is taken from the product's discount kind; whether it stacks
/// with other discounts depends on that kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: Option<EntityId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub discount_amount: f64,
    #[serde(skip)]
    pub product_id: Option<EntityId>,
}

const DISCOUNT_FIELDS: &[FieldDef] = &[
    FieldDef::text("kind").with_column("type"),
    FieldDef::text("description"),
    FieldDef::float("discount_amount"),
    FieldDef::reference("product_id"),
];

impl Entity for Discount {
    fn table_name() -> &'static str {
        "discounts"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        DISCOUNT_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "kind" => Some(self.kind.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "discount_amount" => Some(self.discount_amount.into()),
            "product_id" => Some(self.product_id.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            kind: row.text("type")?,
            description: row.text("description")?,
            discount_amount: row.float("discount_amount")?,
            product_id: row.optional_integer("product_id")?,
        })
    }
}

use chrono::{DateTime, Utc};
use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// A shopper enrolled in the GadgetPoints loyalty program.
///
/// `gadget_points` is the running balance: each purchase adds a
/// [`crate::GadgetPoints`] entry and raises it, each redemption lowers it.
/// `subscription_expiry` is pushed forward when a
/// [`crate::MonthlySubscription`] is bought. Cancelling sets it to now when
/// the cancellation is refunded, otherwise to the end of the paid period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub gadget_points: i64,
    pub subscription_expiry: Option<DateTime<Utc>>,
}

const CUSTOMER_FIELDS: &[FieldDef] = &[
    FieldDef::text("name"),
    FieldDef::text("email"),
    FieldDef::integer("gadget_points"),
    FieldDef::timestamp("subscription_expiry"),
];

impl Entity for Customer {
    fn table_name() -> &'static str {
        "customers"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        CUSTOMER_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "gadget_points" => Some(self.gadget_points.into()),
            "subscription_expiry" => Some(self.subscription_expiry.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            gadget_points: row.integer("gadget_points")?,
            subscription_expiry: row.timestamp("subscription_expiry")?,
        })
    }
}

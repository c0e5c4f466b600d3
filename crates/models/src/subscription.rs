use chrono::{DateTime, Utc};
use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// A monthly subscription bought through an online store.
///
/// Creating one extends `Customer::subscription_expiry` by `num_of_months`.
/// `paid` and `actived` start out false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySubscription {
    pub id: Option<EntityId>,
    #[serde(skip)]
    pub customer_id: Option<EntityId>,
    #[serde(skip)]
    pub online_store_id: Option<EntityId>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub num_of_months: i64,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub actived: bool,
}

const MONTHLY_SUBSCRIPTION_FIELDS: &[FieldDef] = &[
    FieldDef::reference("customer_id"),
    FieldDef::reference("online_store_id"),
    FieldDef::timestamp("start_at"),
    FieldDef::timestamp("end_at"),
    FieldDef::integer("num_of_months"),
    FieldDef::boolean("paid"),
    FieldDef::boolean("actived"),
];

impl Entity for MonthlySubscription {
    fn table_name() -> &'static str {
        "monthly_subscriptions"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        MONTHLY_SUBSCRIPTION_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "customer_id" => Some(self.customer_id.into()),
            "online_store_id" => Some(self.online_store_id.into()),
            "start_at" => Some(self.start_at.into()),
            "end_at" => Some(self.end_at.into()),
            "num_of_months" => Some(self.num_of_months.into()),
            "paid" => Some(self.paid.into()),
            "actived" => Some(self.actived.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            customer_id: row.optional_integer("customer_id")?,
            online_store_id: row.optional_integer("online_store_id")?,
            start_at: row.timestamp("start_at")?,
            end_at: row.timestamp("end_at")?,
            num_of_months: row.integer("num_of_months")?,
            paid: row.boolean("paid")?,
            actived: row.boolean("actived")?,
        })
    }
}

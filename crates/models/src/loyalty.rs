//! GadgetPoints ledger and redemptions
//!
//! A purchase earns points in proportion to the quantity bought; the earned
//! amount is recorded as a [`GadgetPoints`] entry and added to
//! `Customer::gadget_points`. Redeeming points for a freebie at an outlet
//! records a [`PointRedemption`].

use chrono::{DateTime, Utc};
use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// Points earned by one purchase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GadgetPoints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    pub points_earned: i64,
}

const GADGET_POINTS_FIELDS: &[FieldDef] = &[FieldDef::reference("customer_id"), FieldDef::integer("points_earned")];

impl Entity for GadgetPoints {
    fn table_name() -> &'static str {
        "gadget_points"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        GADGET_POINTS_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "customer_id" => Some(self.customer_id.into()),
            "points_earned" => Some(self.points_earned.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            customer_id: row.optional_integer("customer_id")?,
            points_earned: row.integer("points_earned")?,
        })
    }
}

/// Points exchanged for a product at an outlet.
///
/// `replenished` turns true once the company has restocked the freebie at
/// that outlet. The foreign keys stay out of serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRedemption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip)]
    pub customer_id: Option<EntityId>,
    #[serde(skip)]
    pub outlet_id: Option<EntityId>,
    #[serde(skip)]
    pub product_id: Option<EntityId>,
    pub redemption_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replenished: bool,
}

const POINT_REDEMPTION_FIELDS: &[FieldDef] = &[
    FieldDef::reference("customer_id"),
    FieldDef::reference("outlet_id"),
    FieldDef::reference("product_id"),
    FieldDef::timestamp("redemption_date"),
    FieldDef::boolean("replenished"),
];

impl Entity for PointRedemption {
    fn table_name() -> &'static str {
        "point_redemptions"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        POINT_REDEMPTION_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "customer_id" => Some(self.customer_id.into()),
            "outlet_id" => Some(self.outlet_id.into()),
            "product_id" => Some(self.product_id.into()),
            "redemption_date" => Some(self.redemption_date.into()),
            "replenished" => Some(self.replenished.into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            customer_id: row.optional_integer("customer_id")?,
            outlet_id: row.optional_integer("outlet_id")?,
            product_id: row.optional_integer("product_id")?,
            redemption_date: row.timestamp("redemption_date")?,
            replenished: row.boolean("replenished")?,
        })
    }
}

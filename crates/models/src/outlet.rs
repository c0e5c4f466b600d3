use gadget_orm::{DatabaseRow, DatabaseRowExt, DatabaseValue, Entity, EntityId, FieldDef, StoreResult};
use serde::{Deserialize, Serialize};

/// A physical store of the chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub location: String,
}

const OUTLET_FIELDS: &[FieldDef] = &[FieldDef::text("name"), FieldDef::text("location")];

impl Entity for Outlet {
    fn table_name() -> &'static str {
        "outlets"
    }

    fn primary_key(&self) -> Option<EntityId> {
        self.id
    }

    fn set_primary_key(&mut self, key: EntityId) {
        self.id = Some(key);
    }

    fn fields() -> &'static [FieldDef] {
        OUTLET_FIELDS
    }

    fn field_value(&self, name: &str) -> Option<DatabaseValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "location" => Some(self.location.as_str().into()),
            _ => None,
        }
    }

    fn from_database_row(row: &dyn DatabaseRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.optional_integer("id")?,
            name: row.text("name")?,
            location: row.text("location")?,
        })
    }
}

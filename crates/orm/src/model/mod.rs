//! Entity System - capability contract for persisted records
//!
//! - `core_trait`: the `Entity` trait every persisted record implements
//! - `fields`: declarative per-entity field tables

pub mod core_trait;
pub mod fields;

pub use core_trait::{Entity, EntityId};
pub use fields::{FieldDef, FieldKind};

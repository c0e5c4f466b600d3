//! # gadget-models
//!
//! Entities of the gadget retail and loyalty backend. Every type implements
//! [`gadget_orm::Entity`], so one [`gadget_orm::RecordStore`] per type covers
//! all persistence. Business workflows (earning points, renewing
//! subscriptions, stacking discounts) live with the callers; the rules they
//! follow are documented on the types.

pub mod customer;
pub mod discount;
pub mod loyalty;
pub mod outlet;
pub mod product;
pub mod purchase;
pub mod schema;
pub mod subscription;

pub use customer::Customer;
pub use discount::Discount;
pub use loyalty::{GadgetPoints, PointRedemption};
pub use outlet::Outlet;
pub use product::Product;
pub use purchase::Purchase;
pub use subscription::MonthlySubscription;

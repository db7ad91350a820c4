//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod booking;
pub mod service;

pub use booking::{ActiveModel as BookingActiveModel, Entity as BookingEntity, Model as BookingModel};
pub use service::{Entity as ServiceEntity, Model as ServiceModel};

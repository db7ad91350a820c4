//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod auth_service;
mod availability_service;
mod booking_policy;
mod booking_service;
mod catalog_service;
pub mod container;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Claims, OperatorAuthenticator, TokenResponse};
pub use availability_service::{AvailabilityResolver, AvailabilityService};
pub use booking_policy::{parse_date, parse_time, BookingPolicy};
pub use booking_service::{BookingRequest, BookingService, ReservationManager};
pub use catalog_service::{Catalog, CatalogService};

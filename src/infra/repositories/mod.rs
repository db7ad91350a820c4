//! Repository layer - Data access abstraction
//!
//! Repository traits are the seams the services depend on; the SeaORM stores
//! here and the in-memory store in [`crate::infra::memory`] implement them.

pub(crate) mod entities;
mod reservation_repository;
mod service_repository;

pub use reservation_repository::{ReservationRepository, ReservationStore};
pub use service_repository::{ServiceRepository, ServiceStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use reservation_repository::MockReservationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_repository::MockServiceRepository;

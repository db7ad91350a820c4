//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and SeaORM repositories
//! - In-memory store
//! - Redis-backed rate limiting
//! - Clock and health checks
//! - Unit of Work for repository access

pub mod cache;
pub mod clock;
pub mod db;
pub mod health;
pub mod memory;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, LocalRateLimiter, RateLimiter};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{Database, Migrator};
pub use health::HealthCheck;
pub use memory::MemoryStore;
pub use repositories::{ReservationRepository, ReservationStore, ServiceRepository, ServiceStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockReservationRepository, MockServiceRepository};

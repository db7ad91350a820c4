//! Unit of Work - single access point to the repositories.
//!
//! Services depend on [`UnitOfWork`] rather than on concrete stores, so the
//! same booking logic runs over SeaORM or the in-memory store.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::memory::MemoryStore;
use super::repositories::{
    ReservationRepository, ReservationStore, ServiceRepository, ServiceStore,
};

/// Repository access for the service layer.
pub trait UnitOfWork: Send + Sync {
    /// Service catalog repository
    fn services(&self) -> Arc<dyn ServiceRepository>;

    /// Reservation repository
    fn reservations(&self) -> Arc<dyn ReservationRepository>;
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    service_repo: Arc<dyn ServiceRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
}

impl Persistence {
    /// Repositories over a SeaORM connection.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            service_repo: Arc::new(ServiceStore::new(db.clone())),
            reservation_repo: Arc::new(ReservationStore::new(db)),
        }
    }

    /// Repositories over a fresh, seeded in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::seeded()))
    }

    /// Repositories over an existing in-memory store.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            service_repo: store.clone(),
            reservation_repo: store,
        }
    }

    /// Repositories supplied directly (mocks in tests).
    pub fn new(
        service_repo: Arc<dyn ServiceRepository>,
        reservation_repo: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            service_repo,
            reservation_repo,
        }
    }
}

impl UnitOfWork for Persistence {
    fn services(&self) -> Arc<dyn ServiceRepository> {
        self.service_repo.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repo.clone()
    }
}

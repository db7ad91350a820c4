//! Service Container - centralized service construction and access.

use std::sync::Arc;

use super::{
    AuthService, AvailabilityResolver, AvailabilityService, BookingPolicy, BookingService,
    Catalog, CatalogService, OperatorAuthenticator, ReservationManager,
};
use crate::config::Config;
use crate::infra::{Clock, UnitOfWork};
use crate::notifications::NotificationDispatcher;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn availability(&self) -> Arc<dyn AvailabilityService>;

    fn bookings(&self) -> Arc<dyn BookingService>;

    fn auth(&self) -> Arc<dyn AuthService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    catalog_service: Arc<dyn CatalogService>,
    availability_service: Arc<dyn AvailabilityService>,
    booking_service: Arc<dyn BookingService>,
    auth_service: Arc<dyn AuthService>,
}

impl Services {
    /// Wire every service over one Unit of Work.
    pub fn build<U>(
        uow: Arc<U>,
        config: &Config,
        clock: Arc<dyn Clock>,
        notifications: NotificationDispatcher,
    ) -> Self
    where
        U: UnitOfWork + 'static,
    {
        let policy = BookingPolicy::from_config(config, clock);

        Self {
            catalog_service: Arc::new(Catalog::new(uow.clone())),
            availability_service: Arc::new(AvailabilityResolver::new(uow.clone(), policy.clone())),
            booking_service: Arc::new(ReservationManager::new(uow, policy, notifications)),
            auth_service: Arc::new(OperatorAuthenticator::new(config.clone())),
        }
    }
}

impl ServiceContainer for Services {
    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn availability(&self) -> Arc<dyn AvailabilityService> {
        self.availability_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }
}

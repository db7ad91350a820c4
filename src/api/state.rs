//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Clock, HealthCheck, RateLimiter};
use crate::services::{
    AuthService, AvailabilityService, BookingService, CatalogService, ServiceContainer,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub bookings: Arc<dyn BookingService>,
    pub auth_service: Arc<dyn AuthService>,
    /// Request counter for the rate limit middleware
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Shop-local clock, for "upcoming" filters
    pub clock: Arc<dyn Clock>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Build state from a service container.
    pub fn new(
        services: &impl ServiceContainer,
        rate_limiter: Arc<dyn RateLimiter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog: services.catalog(),
            availability: services.availability(),
            bookings: services.bookings(),
            auth_service: services.auth(),
            rate_limiter,
            clock,
            health_checks: Vec::new(),
        }
    }

    /// Report `check` on `GET /health`.
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    pub fn health_checks(&self) -> &[Arc<dyn HealthCheck>] {
        &self.health_checks
    }
}

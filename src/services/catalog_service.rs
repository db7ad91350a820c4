//! Catalog service - read-only access to bookable services.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Service;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All services, cheapest first
    async fn list_services(&self) -> AppResult<Vec<Service>>;

    /// One service, or `NotFound`
    async fn get_service(&self, id: i32) -> AppResult<Service>;
}

pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn list_services(&self) -> AppResult<Vec<Service>> {
        self.uow.services().list().await
    }

    async fn get_service(&self, id: i32) -> AppResult<Service> {
        self.uow.services().find_by_id(id).await?.ok_or_not_found()
    }
}

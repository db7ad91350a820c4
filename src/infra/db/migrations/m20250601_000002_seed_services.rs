//! Migration: Seed the default service catalog.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_services_table::Services;
use crate::config::SEED_SERVICES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Services::Table).columns([
            Services::Name,
            Services::DurationMinutes,
            Services::PriceCents,
        ]);

        for &(name, duration, cents) in SEED_SERVICES {
            insert.values_panic([name.into(), duration.into(), cents.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<&str> = SEED_SERVICES.iter().map(|&(name, _, _)| name).collect();

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Services::Table)
                    .and_where(Expr::col(Services::Name).is_in(names))
                    .to_owned(),
            )
            .await
    }
}

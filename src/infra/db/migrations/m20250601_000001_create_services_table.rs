//! Migration: Create the service catalog table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::DurationMinutes).integer().not_null())
                    .col(ColumnDef::new(Services::PriceCents).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Catalog is listed cheapest first
        manager
            .create_index(
                Index::create()
                    .name("idx_services_price_cents")
                    .table(Services::Table)
                    .col(Services::PriceCents)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Services {
    Table,
    Id,
    Name,
    DurationMinutes,
    PriceCents,
}

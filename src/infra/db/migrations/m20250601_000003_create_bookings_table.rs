//! Migration: Create the bookings table and the confirmed-slot constraint.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use super::m20250601_000001_create_services_table::Services;
use crate::config::{CONFIRMED_SLOT_INDEX, STATUS_CONFIRMED};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::ServiceId).integer().not_null())
                    .col(ColumnDef::new(Bookings::StartsAt).date_time().not_null())
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string().null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default(STATUS_CONFIRMED),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::CancelledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_service_id")
                            .from(Bookings::Table, Bookings::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Range reads by day
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_starts_at")
                    .table(Bookings::Table)
                    .col(Bookings::StartsAt)
                    .to_owned(),
            )
            .await?;

        // At most one confirmed booking per start time (partial unique index,
        // same SQL on PostgreSQL and SQLite)
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON bookings (starts_at) WHERE status = '{}'",
                CONFIRMED_SLOT_INDEX, STATUS_CONFIRMED
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    ServiceId,
    StartsAt,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    Status,
    CreatedAt,
    CancelledAt,
}

//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_services_table;
mod m20250601_000002_seed_services;
mod m20250601_000003_create_bookings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_services_table::Migration),
            Box::new(m20250601_000002_seed_services::Migration),
            Box::new(m20250601_000003_create_bookings_table::Migration),
        ]
    }
}

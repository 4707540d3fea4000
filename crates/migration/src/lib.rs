//! Migrator registering entity-specific migrations in dependency order.
//! Composite unique indexes are applied last; they carry the ledger and
//! counter invariants.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_tenant;
mod m20240101_000002_create_user;
mod m20240101_000003_create_user_credentials;
mod m20240101_000004_create_role_grant;
mod m20240101_000005_create_member;
mod m20240101_000006_create_tenant_counter;
mod m20240101_000007_create_fee_schedule;
mod m20240101_000008_create_payment;
mod m20240101_000009_create_income_type;
mod m20240101_000010_create_income;
mod m20240101_000011_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_tenant::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            Box::new(m20240101_000003_create_user_credentials::Migration),
            Box::new(m20240101_000004_create_role_grant::Migration),
            Box::new(m20240101_000005_create_member::Migration),
            Box::new(m20240101_000006_create_tenant_counter::Migration),
            Box::new(m20240101_000007_create_fee_schedule::Migration),
            Box::new(m20240101_000008_create_payment::Migration),
            Box::new(m20240101_000009_create_income_type::Migration),
            Box::new(m20240101_000010_create_income::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000011_add_indexes::Migration),
        ]
    }
}

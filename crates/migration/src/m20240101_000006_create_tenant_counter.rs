//! Create `tenant_counter` table.
//!
//! One row per tenant; `next_member_number` only moves forward via a
//! single-row atomic update.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TenantCounter::Table)
                    .if_not_exists()
                    .col(uuid(TenantCounter::TenantId).primary_key())
                    .col(integer(TenantCounter::NextMemberNumber).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenant_counter_tenant")
                            .from(TenantCounter::Table, TenantCounter::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TenantCounter::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TenantCounter { Table, TenantId, NextMemberNumber }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

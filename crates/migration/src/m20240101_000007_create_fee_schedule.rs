//! Create `fee_schedule` table with FK to `tenant`.
//!
//! A NULL amount means "not yet configured" for that calendar month and
//! blocks payment registration; it is never a zero default.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeeSchedule::Table)
                    .if_not_exists()
                    .col(uuid(FeeSchedule::Id).primary_key())
                    .col(uuid(FeeSchedule::TenantId).not_null())
                    .col(small_integer(FeeSchedule::Month).not_null())
                    .col(ColumnDef::new(FeeSchedule::Amount).decimal_len(12, 2).null())
                    .col(timestamp_with_time_zone(FeeSchedule::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_schedule_tenant")
                            .from(FeeSchedule::Table, FeeSchedule::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FeeSchedule::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FeeSchedule { Table, Id, TenantId, Month, Amount, UpdatedAt }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

//! Create `payment` table with FKs to `tenant` and `member`.
//!
//! The ledger. Rows are append-only; the composite unique index added in
//! the index migration makes a (tenant, member, year, month) payable at
//! most once.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::TenantId).not_null())
                    .col(uuid(Payment::MemberId).not_null())
                    .col(integer(Payment::Year).not_null())
                    .col(small_integer(Payment::Month).not_null())
                    .col(ColumnDef::new(Payment::Amount).decimal_len(12, 2).not_null())
                    .col(date(Payment::PaidOn).not_null())
                    .col(timestamp_with_time_zone(Payment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_tenant")
                            .from(Payment::Table, Payment::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_member")
                            .from(Payment::Table, Payment::MemberId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment { Table, Id, TenantId, MemberId, Year, Month, Amount, PaidOn, CreatedAt }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

#[derive(DeriveIden)]
enum Member { Table, Id }

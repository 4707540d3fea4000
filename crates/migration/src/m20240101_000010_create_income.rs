//! Create `income` table with FKs to `tenant` and `income_type`.
//!
//! Non-member income; independent of the payment ledger and carries no
//! uniqueness constraint beyond identity.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(uuid(Income::Id).primary_key())
                    .col(uuid(Income::TenantId).not_null())
                    .col(uuid(Income::IncomeTypeId).not_null())
                    .col(date(Income::Date).not_null())
                    .col(ColumnDef::new(Income::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Income::Note).text().null())
                    .col(boolean(Income::Active).not_null())
                    .col(timestamp_with_time_zone(Income::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_tenant")
                            .from(Income::Table, Income::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_income_type")
                            .from(Income::Table, Income::IncomeTypeId)
                            .to(IncomeType::Table, IncomeType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Income::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Income { Table, Id, TenantId, IncomeTypeId, Date, Amount, Note, Active, CreatedAt }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

#[derive(DeriveIden)]
enum IncomeType { Table, Id }

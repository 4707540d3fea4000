//! Create `income_type` table with FK to `tenant`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IncomeType::Table)
                    .if_not_exists()
                    .col(uuid(IncomeType::Id).primary_key())
                    .col(uuid(IncomeType::TenantId).not_null())
                    .col(string_len(IncomeType::Name, 128).not_null())
                    .col(boolean(IncomeType::Active).not_null())
                    .col(timestamp_with_time_zone(IncomeType::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_type_tenant")
                            .from(IncomeType::Table, IncomeType::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(IncomeType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum IncomeType { Table, Id, TenantId, Name, Active, CreatedAt }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

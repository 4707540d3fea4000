//! Create `member` table with FK to `tenant`.
//!
//! member_number and document_number are unique per tenant; the indexes
//! are created in the final migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(uuid(Member::Id).primary_key())
                    .col(uuid(Member::TenantId).not_null())
                    .col(integer(Member::MemberNumber).not_null())
                    .col(string_len(Member::DocumentNumber, 32).not_null())
                    .col(string_len(Member::FirstName, 128).not_null())
                    .col(string_len(Member::LastName, 128).not_null())
                    .col(string_len(Member::Category, 64).not_null())
                    .col(ColumnDef::new(Member::Phone).string_len(32).null())
                    .col(date(Member::BirthDate).not_null())
                    .col(ColumnDef::new(Member::JoinDate).date().null())
                    .col(boolean(Member::Active).not_null())
                    .col(boolean(Member::Scholarship).not_null())
                    .col(timestamp_with_time_zone(Member::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_tenant")
                            .from(Member::Table, Member::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Member::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    TenantId,
    MemberNumber,
    DocumentNumber,
    FirstName,
    LastName,
    Category,
    Phone,
    BirthDate,
    JoinDate,
    Active,
    Scholarship,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tenant { Table, Id }

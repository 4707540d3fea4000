//! Create `role_grant` table with FKs to `user` and `tenant`.
//!
//! A NULL tenant_id marks a platform-admin grant, which is tenant
//! independent. One role per (user, tenant); edits go through upsert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleGrant::Table)
                    .if_not_exists()
                    .col(uuid(RoleGrant::Id).primary_key())
                    .col(uuid(RoleGrant::UserId).not_null())
                    .col(ColumnDef::new(RoleGrant::TenantId).uuid().null())
                    .col(string_len(RoleGrant::Role, 32).not_null())
                    .col(timestamp_with_time_zone(RoleGrant::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_grant_user")
                            .from(RoleGrant::Table, RoleGrant::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_grant_tenant")
                            .from(RoleGrant::Table, RoleGrant::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RoleGrant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RoleGrant { Table, Id, UserId, TenantId, Role, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Tenant { Table, Id }

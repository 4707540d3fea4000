use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // RoleGrant: one role per (user, tenant); platform-admin rows have
        // NULL tenant and are deduplicated by the upsert helper.
        manager
            .create_index(
                Index::create()
                    .name("uniq_role_grant_user_tenant")
                    .table(RoleGrant::Table)
                    .col(RoleGrant::UserId)
                    .col(RoleGrant::TenantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Member: sequential number and identity document unique per tenant.
        manager
            .create_index(
                Index::create()
                    .name("uniq_member_tenant_number")
                    .table(Member::Table)
                    .col(Member::TenantId)
                    .col(Member::MemberNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq_member_tenant_document")
                    .table(Member::Table)
                    .col(Member::TenantId)
                    .col(Member::DocumentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // FeeSchedule: one amount slot per (tenant, month).
        manager
            .create_index(
                Index::create()
                    .name("uniq_fee_schedule_tenant_month")
                    .table(FeeSchedule::Table)
                    .col(FeeSchedule::TenantId)
                    .col(FeeSchedule::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Payment: the ledger invariant. A month is payable at most once per
        // member; concurrent registrations race on this index.
        manager
            .create_index(
                Index::create()
                    .name("uniq_payment_tenant_member_year_month")
                    .table(Payment::Table)
                    .col(Payment::TenantId)
                    .col(Payment::MemberId)
                    .col(Payment::Year)
                    .col(Payment::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_tenant_year")
                    .table(Payment::Table)
                    .col(Payment::TenantId)
                    .col(Payment::Year)
                    .to_owned(),
            )
            .await?;

        // IncomeType: names unique per tenant.
        manager
            .create_index(
                Index::create()
                    .name("uniq_income_type_tenant_name")
                    .table(IncomeType::Table)
                    .col(IncomeType::TenantId)
                    .col(IncomeType::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Income: listed by date within a tenant.
        manager
            .create_index(
                Index::create()
                    .name("idx_income_tenant_date")
                    .table(Income::Table)
                    .col(Income::TenantId)
                    .col(Income::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_role_grant_user_tenant").table(RoleGrant::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_member_tenant_number").table(Member::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_member_tenant_document").table(Member::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_fee_schedule_tenant_month").table(FeeSchedule::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_payment_tenant_member_year_month").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_tenant_year").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_income_type_tenant_name").table(IncomeType::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_income_tenant_date").table(Income::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleGrant { Table, UserId, TenantId }

#[derive(DeriveIden)]
enum Member { Table, TenantId, MemberNumber, DocumentNumber }

#[derive(DeriveIden)]
enum FeeSchedule { Table, TenantId, Month }

#[derive(DeriveIden)]
enum Payment { Table, TenantId, MemberId, Year, Month }

#[derive(DeriveIden)]
enum IncomeType { Table, TenantId, Name }

#[derive(DeriveIden)]
enum Income { Table, TenantId, Date }

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use models::payment::InsertOutcome;
use models::{fee_schedule, member, payment};

use crate::dues::domain::{LedgerEntry, MemberOverview, PaidKey};
use crate::dues::errors::DuesError;
use crate::dues::repository::DuesRepository;

pub struct SeaOrmDuesRepository {
    pub db: DatabaseConnection,
}

fn repo_err(e: impl std::fmt::Display) -> DuesError {
    DuesError::Repository(e.to_string())
}

fn to_overview(m: member::Model) -> MemberOverview {
    MemberOverview {
        id: m.id,
        member_number: m.member_number,
        first_name: m.first_name,
        last_name: m.last_name,
        category: m.category,
        scholarship: m.scholarship,
    }
}

fn to_entry(p: payment::Model) -> LedgerEntry {
    LedgerEntry { month: p.month, amount: p.amount, paid_on: p.paid_on }
}

#[async_trait::async_trait]
impl DuesRepository for SeaOrmDuesRepository {
    async fn monthly_amounts(&self, tenant_id: Uuid) -> Result<HashMap<i16, Decimal>, DuesError> {
        let rows = fee_schedule::list_by_tenant(&self.db, tenant_id).await.map_err(repo_err)?;
        Ok(rows.into_iter().filter_map(|r| r.amount.map(|a| (r.month, a))).collect())
    }

    async fn find_member(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<MemberOverview>, DuesError> {
        let found = member::find_in_tenant(&self.db, tenant_id, member_id)
            .await
            .map_err(repo_err)?;
        Ok(found.map(to_overview))
    }

    async fn active_members(&self, tenant_id: Uuid) -> Result<Vec<MemberOverview>, DuesError> {
        let rows = member::list_by_tenant(&self.db, tenant_id).await.map_err(repo_err)?;
        Ok(rows.into_iter().filter(|m| m.active).map(to_overview).collect())
    }

    async fn insert_payments(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
        year: i32,
        charges: &[(i16, Decimal)],
        paid_on: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, DuesError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        let mut inserted = Vec::new();
        for (month, amount) in charges {
            let outcome =
                payment::insert_skip_duplicate(&txn, tenant_id, member_id, year, *month, *amount, paid_on)
                    .await
                    .map_err(repo_err)?;
            if let InsertOutcome::Inserted(row) = outcome {
                inserted.push(to_entry(row));
            }
        }
        txn.commit().await.map_err(repo_err)?;
        Ok(inserted)
    }

    async fn member_payments(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
        year: i32,
    ) -> Result<Vec<LedgerEntry>, DuesError> {
        let rows = payment::list_for_member(&self.db, tenant_id, member_id, year)
            .await
            .map_err(repo_err)?;
        Ok(rows.into_iter().map(to_entry).collect())
    }

    async fn paid_keys(&self, tenant_id: Uuid, year: i32) -> Result<Vec<PaidKey>, DuesError> {
        let rows = payment::list_for_tenant_year(&self.db, tenant_id, year)
            .await
            .map_err(repo_err)?;
        Ok(rows
            .into_iter()
            .map(|p| PaidKey { member_id: p.member_id, year: p.year, month: p.month })
            .collect())
    }
}

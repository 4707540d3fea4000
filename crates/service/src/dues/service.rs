use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{MemberStatement, Registration, RegistrationInput, RosterRow};
use super::errors::DuesError;
use super::repository::DuesRepository;
use super::status;

/// Dues business service independent of web framework
pub struct DuesService<R: DuesRepository> {
    repo: Arc<R>,
}

impl<R: DuesRepository> DuesService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register one or more months for a member.
    ///
    /// The whole batch is validated against the fee schedule first: if any
    /// requested month has no configured amount, nothing is written and the
    /// error names every missing month. Months already paid are skipped
    /// silently; retries are safe.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, member_id = %input.member_id, year = input.year))]
    pub async fn register(
        &self,
        tenant_id: Uuid,
        input: RegistrationInput,
    ) -> Result<Registration, DuesError> {
        if input.months.is_empty() {
            return Err(DuesError::Validation("months required".into()));
        }
        let invalid: Vec<String> = input
            .months
            .iter()
            .filter(|m| !(1..=12).contains(*m))
            .map(|m| m.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(DuesError::Validation(format!(
                "months out of range: {}",
                invalid.join(", ")
            )));
        }

        self.repo
            .find_member(tenant_id, input.member_id)
            .await?
            .ok_or_else(|| DuesError::NotFound("member not found".into()))?;

        let mut months = input.months.clone();
        months.sort_unstable();
        months.dedup();

        let amounts = self.repo.monthly_amounts(tenant_id).await?;
        let missing: Vec<String> = months
            .iter()
            .filter(|m| !amounts.contains_key(*m))
            .map(|m| m.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DuesError::Validation(format!(
                "missing amount for months: {}",
                missing.join(", ")
            )));
        }

        let charges: Vec<(i16, rust_decimal::Decimal)> =
            months.iter().map(|m| (*m, amounts[m])).collect();
        let inserted = self
            .repo
            .insert_payments(tenant_id, input.member_id, input.year, &charges, input.paid_on)
            .await?;

        info!(
            requested = months.len(),
            inserted = inserted.len(),
            "payments_registered"
        );
        Ok(Registration { inserted_count: inserted.len(), inserted })
    }

    /// One member's ledger for a year, with their standing as of `reference`.
    pub async fn member_statement(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
        year: i32,
        reference: NaiveDate,
    ) -> Result<MemberStatement, DuesError> {
        let member = self
            .repo
            .find_member(tenant_id, member_id)
            .await?
            .ok_or_else(|| DuesError::NotFound("member not found".into()))?;

        let payments = self.repo.member_payments(tenant_id, member_id, year).await?;
        let paid_months: Vec<i16> = payments.iter().map(|p| p.month).collect();

        // Standing needs the tenant-wide key set: the tolerance window may
        // reach into the prior December, which the year listing omits.
        let keys = self.repo.paid_keys(tenant_id, year).await?;
        let paid: HashSet<(i32, i16)> = keys
            .iter()
            .filter(|k| k.member_id == member_id)
            .map(|k| (k.year, k.month))
            .collect();
        let current = status::is_current(member.scholarship, &paid, reference);

        Ok(MemberStatement { member, year, payments, paid_months, current })
    }

    /// Roster summary for a year: every active member with their paid
    /// months and standing. Two queries total regardless of roster size.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, year))]
    pub async fn roster_summary(
        &self,
        tenant_id: Uuid,
        year: i32,
        reference: NaiveDate,
    ) -> Result<Vec<RosterRow>, DuesError> {
        let members = self.repo.active_members(tenant_id).await?;
        let keys = self.repo.paid_keys(tenant_id, year).await?;

        let mut by_member: HashMap<Uuid, HashSet<(i32, i16)>> = HashMap::new();
        for key in keys {
            by_member.entry(key.member_id).or_default().insert((key.year, key.month));
        }

        let empty = HashSet::new();
        Ok(members
            .into_iter()
            .map(|member| {
                let paid = by_member.get(&member.id).unwrap_or(&empty);
                let mut paid_months: Vec<i16> = paid
                    .iter()
                    .filter(|(y, _)| *y == year)
                    .map(|(_, m)| *m)
                    .collect();
                paid_months.sort_unstable();
                let current = status::is_current(member.scholarship, paid, reference);
                RosterRow { member, paid_months, current }
            })
            .collect())
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{LedgerEntry, MemberOverview, PaidKey};
use super::errors::DuesError;

/// Repository abstraction for dues persistence.
#[async_trait]
pub trait DuesRepository: Send + Sync {
    /// Configured fee amounts by month. Months absent from the map block
    /// registration.
    async fn monthly_amounts(&self, tenant_id: Uuid) -> Result<HashMap<i16, Decimal>, DuesError>;

    async fn find_member(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<MemberOverview>, DuesError>;

    async fn active_members(&self, tenant_id: Uuid) -> Result<Vec<MemberOverview>, DuesError>;

    /// Record the given (month, amount) charges atomically, skipping months
    /// already on the ledger. Returns the rows actually inserted.
    async fn insert_payments(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
        year: i32,
        charges: &[(i16, Decimal)],
        paid_on: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, DuesError>;

    /// One member's ledger rows for a year, ascending by month.
    async fn member_payments(
        &self,
        tenant_id: Uuid,
        member_id: Uuid,
        year: i32,
    ) -> Result<Vec<LedgerEntry>, DuesError>;

    /// Paid keys for the whole tenant: the requested year plus the prior
    /// December (the January tolerance looks there). Single query, no N+1.
    async fn paid_keys(&self, tenant_id: Uuid, year: i32) -> Result<Vec<PaidKey>, DuesError>;
}

/// In-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockDuesRepository {
        amounts: Mutex<HashMap<(Uuid, i16), Decimal>>,
        members: Mutex<HashMap<(Uuid, Uuid), MemberOverview>>,
        // key: (tenant, member, year, month) -> (amount, paid_on)
        ledger: Mutex<BTreeMap<(Uuid, Uuid, i32, i16), (Decimal, NaiveDate)>>,
    }

    impl MockDuesRepository {
        pub fn set_amount(&self, tenant_id: Uuid, month: i16, amount: Decimal) {
            self.amounts.lock().unwrap().insert((tenant_id, month), amount);
        }

        pub fn add_member(&self, tenant_id: Uuid, member: MemberOverview) {
            self.members.lock().unwrap().insert((tenant_id, member.id), member);
        }

        pub fn ledger_len(&self) -> usize {
            self.ledger.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DuesRepository for MockDuesRepository {
        async fn monthly_amounts(
            &self,
            tenant_id: Uuid,
        ) -> Result<HashMap<i16, Decimal>, DuesError> {
            let amounts = self.amounts.lock().unwrap();
            Ok(amounts
                .iter()
                .filter(|((t, _), _)| *t == tenant_id)
                .map(|((_, m), a)| (*m, *a))
                .collect())
        }

        async fn find_member(
            &self,
            tenant_id: Uuid,
            member_id: Uuid,
        ) -> Result<Option<MemberOverview>, DuesError> {
            let members = self.members.lock().unwrap();
            Ok(members.get(&(tenant_id, member_id)).cloned())
        }

        async fn active_members(&self, tenant_id: Uuid) -> Result<Vec<MemberOverview>, DuesError> {
            let members = self.members.lock().unwrap();
            let mut list: Vec<MemberOverview> = members
                .iter()
                .filter(|((t, _), _)| *t == tenant_id)
                .map(|(_, m)| m.clone())
                .collect();
            list.sort_by_key(|m| m.member_number);
            Ok(list)
        }

        async fn insert_payments(
            &self,
            tenant_id: Uuid,
            member_id: Uuid,
            year: i32,
            charges: &[(i16, Decimal)],
            paid_on: NaiveDate,
        ) -> Result<Vec<LedgerEntry>, DuesError> {
            let mut ledger = self.ledger.lock().unwrap();
            let mut inserted = Vec::new();
            for (month, amount) in charges {
                let key = (tenant_id, member_id, year, *month);
                if ledger.contains_key(&key) {
                    continue;
                }
                ledger.insert(key, (*amount, paid_on));
                inserted.push(LedgerEntry { month: *month, amount: *amount, paid_on });
            }
            Ok(inserted)
        }

        async fn member_payments(
            &self,
            tenant_id: Uuid,
            member_id: Uuid,
            year: i32,
        ) -> Result<Vec<LedgerEntry>, DuesError> {
            let ledger = self.ledger.lock().unwrap();
            Ok(ledger
                .iter()
                .filter(|((t, m, y, _), _)| *t == tenant_id && *m == member_id && *y == year)
                .map(|((_, _, _, month), (amount, paid_on))| LedgerEntry {
                    month: *month,
                    amount: *amount,
                    paid_on: *paid_on,
                })
                .collect())
        }

        async fn paid_keys(&self, tenant_id: Uuid, year: i32) -> Result<Vec<PaidKey>, DuesError> {
            let ledger = self.ledger.lock().unwrap();
            Ok(ledger
                .keys()
                .filter(|(t, _, y, m)| {
                    *t == tenant_id && (*y == year || (*y == year - 1 && *m == 12))
                })
                .map(|(_, member_id, y, m)| PaidKey { member_id: *member_id, year: *y, month: *m })
                .collect())
        }
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roster view of a member, enough for summaries and statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberOverview {
    pub id: Uuid,
    pub member_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub scholarship: bool,
}

/// One recorded payment month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub month: i16,
    pub amount: Decimal,
    pub paid_on: NaiveDate,
}

/// Registration request: one member, one year, one or more months.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationInput {
    pub member_id: Uuid,
    pub year: i32,
    pub months: Vec<i16>,
    pub paid_on: NaiveDate,
}

/// Registration outcome. Months already on the ledger are skipped, not
/// errors, so `inserted_count` may be less than the months requested.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub inserted_count: usize,
    pub inserted: Vec<LedgerEntry>,
}

/// A member's ledger for one year plus their standing.
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatement {
    pub member: MemberOverview,
    pub year: i32,
    pub payments: Vec<LedgerEntry>,
    pub paid_months: Vec<i16>,
    pub current: bool,
}

/// One roster summary row.
#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    pub member: MemberOverview,
    pub paid_months: Vec<i16>,
    pub current: bool,
}

/// (member, year, month) key of a recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaidKey {
    pub member_id: Uuid,
    pub year: i32,
    pub month: i16,
}

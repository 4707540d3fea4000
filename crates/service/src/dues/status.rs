//! Standing classification: paid-up within a two-month window.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// Calendar month preceding (year, month), rolling January back to the
/// prior December.
pub fn previous_month(year: i32, month: i16) -> (i32, i16) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// A member is current when they hold a scholarship, or when the ledger
/// shows a payment for the reference month or the month before it. The
/// payment date is irrelevant; only the covered (year, month) counts.
pub fn is_current(scholarship: bool, paid: &HashSet<(i32, i16)>, reference: NaiveDate) -> bool {
    if scholarship {
        return true;
    }
    let (year, month) = (reference.year(), reference.month() as i16);
    if paid.contains(&(year, month)) {
        return true;
    }
    paid.contains(&previous_month(year, month))
}

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::fee_schedule;

use crate::errors::ServiceError;

/// One slot of the twelve-month fee view. `amount: None` means the month
/// is not configured yet and blocks dues registration for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthFee {
    pub month: i16,
    pub amount: Option<Decimal>,
}

/// Expand the stored rows into the full January..December view.
pub fn expand_to_year(rows: &[fee_schedule::Model]) -> Vec<MonthFee> {
    (1..=12i16)
        .map(|month| MonthFee {
            month,
            amount: rows.iter().find(|r| r.month == month).and_then(|r| r.amount),
        })
        .collect()
}

#[instrument(skip(db), fields(tenant_id = %tenant_id, month))]
pub async fn set_month_amount(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    month: i16,
    amount: Option<Decimal>,
) -> Result<MonthFee, ServiceError> {
    let row = fee_schedule::upsert(db, tenant_id, month, amount).await?;
    info!("fee_schedule_updated");
    Ok(MonthFee { month: row.month, amount: row.amount })
}

pub async fn list_schedule(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<Vec<MonthFee>, ServiceError> {
    let rows = fee_schedule::list_by_tenant(db, tenant_id).await?;
    Ok(expand_to_year(&rows))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::prelude::DateTimeWithTimeZone;

    use super::*;

    fn row(month: i16, amount: Option<Decimal>) -> fee_schedule::Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        fee_schedule::Model { id: Uuid::new_v4(), tenant_id: Uuid::new_v4(), month, amount, updated_at: now }
    }

    #[test]
    fn expansion_always_yields_twelve_slots() {
        let rows = vec![row(3, Some(Decimal::new(10000, 2))), row(7, None)];
        let view = expand_to_year(&rows);
        assert_eq!(view.len(), 12);
        assert_eq!(view[2], MonthFee { month: 3, amount: Some(Decimal::new(10000, 2)) });
        assert_eq!(view[6], MonthFee { month: 7, amount: None });
        assert_eq!(view[0], MonthFee { month: 1, amount: None });
    }

    #[test]
    fn empty_schedule_is_twelve_unset_slots() {
        let view = expand_to_year(&[]);
        assert_eq!(view.len(), 12);
        assert!(view.iter().all(|s| s.amount.is_none()));
    }

    #[tokio::test]
    async fn editing_one_month_leaves_the_others_untouched() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = crate::test_support::get_db().await?;
        let t = models::tenant::create(&db, &format!("schedule_{}", Uuid::new_v4())).await?;

        set_month_amount(&db, t.id, 3, Some(Decimal::new(10000, 2))).await?;
        set_month_amount(&db, t.id, 7, Some(Decimal::new(8000, 2))).await?;

        // Re-setting a month replaces its amount in place.
        set_month_amount(&db, t.id, 3, Some(Decimal::new(12000, 2))).await?;
        let view = list_schedule(&db, t.id).await?;
        assert_eq!(view[2].amount, Some(Decimal::new(12000, 2)));
        assert_eq!(view[6].amount, Some(Decimal::new(8000, 2)));

        // Null clears the slot back to unconfigured; the other month stays.
        set_month_amount(&db, t.id, 3, None).await?;
        let view = list_schedule(&db, t.id).await?;
        assert_eq!(view[2].amount, None);
        assert_eq!(view[6].amount, Some(Decimal::new(8000, 2)));

        // Validation failures touch nothing.
        assert!(set_month_amount(&db, t.id, 13, Some(Decimal::ZERO)).await.is_err());
        assert!(set_month_amount(&db, t.id, 7, Some(Decimal::new(-100, 2))).await.is_err());
        let view = list_schedule(&db, t.id).await?;
        assert_eq!(view[6].amount, Some(Decimal::new(8000, 2)));

        use sea_orm::EntityTrait;
        models::tenant::Entity::delete_by_id(t.id).exec(&db).await?;
        Ok(())
    }
}

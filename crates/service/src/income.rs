use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{income, income_type};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// A page of income entries plus the total over the whole date window,
/// not just the page.
#[derive(Debug, Clone, Serialize)]
pub struct IncomeReport {
    pub entries: Vec<income::Model>,
    pub total: Decimal,
}

#[instrument(skip(db, note), fields(tenant_id = %tenant_id))]
pub async fn record_income(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    income_type_id: Uuid,
    date: NaiveDate,
    amount: Decimal,
    note: Option<String>,
) -> Result<income::Model, ServiceError> {
    income_type::find_active(db, tenant_id, income_type_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("income type"))?;

    let created = income::create(db, tenant_id, income_type_id, date, amount, note).await?;
    info!(income_id = %created.id, "income_recorded");
    Ok(created)
}

pub async fn list_income(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    page: Pagination,
) -> Result<IncomeReport, ServiceError> {
    let (offset, limit) = page.normalize();
    let entries = income::list_by_tenant(db, tenant_id, from, to, limit, offset).await?;
    let total = window_total(db, tenant_id, from, to).await?;
    Ok(IncomeReport { entries, total })
}

async fn window_total(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Decimal, ServiceError> {
    let mut query = income::Entity::find()
        .select_only()
        .column_as(income::Column::Amount.sum(), "total")
        .filter(income::Column::TenantId.eq(tenant_id))
        .filter(income::Column::Active.eq(true));
    if let Some(from) = from {
        query = query.filter(income::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(income::Column::Date.lte(to));
    }
    let total: Option<Option<Decimal>> = query
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(total.flatten().unwrap_or_default())
}

pub async fn create_income_type(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    name: &str,
) -> Result<income_type::Model, ServiceError> {
    Ok(income_type::create(db, tenant_id, name).await?)
}

pub async fn list_income_types(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<Vec<income_type::Model>, ServiceError> {
    Ok(income_type::list_active(db, tenant_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::tenant;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn income_window_totals_whole_range_not_page() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;
        let t = tenant::create(&db, &format!("income_{}", Uuid::new_v4())).await?;
        let kind = create_income_type(&db, t.id, "bar sales").await?;

        for day in 1..=3 {
            let date = NaiveDate::from_ymd_opt(2026, 5, day).unwrap();
            record_income(&db, t.id, kind.id, date, Decimal::new(1000, 2), None).await?;
        }

        let report = list_income(
            &db,
            t.id,
            Some(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2026, 5, 31).unwrap()),
            Pagination { limit: Some(2), offset: None },
        )
        .await?;
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total, Decimal::new(3000, 2));

        tenant::Entity::delete_by_id(t.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_income_type_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;
        let t = tenant::create(&db, &format!("income_bad_{}", Uuid::new_v4())).await?;

        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let err = record_income(&db, t.id, Uuid::new_v4(), date, Decimal::new(1000, 2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        tenant::Entity::delete_by_id(t.id).exec(&db).await?;
        Ok(())
    }
}

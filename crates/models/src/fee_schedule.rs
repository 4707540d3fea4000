use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::tenant;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_schedule")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub month: i16,
    /// None = not configured; blocks registration for this month.
    pub amount: Option<Decimal>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tenant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tenant => Entity::belongs_to(tenant::Entity)
                .from(Column::TenantId)
                .to(tenant::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_month(month: i16) -> Result<(), ModelError> {
    if !(1..=12).contains(&month) {
        return Err(ModelError::Validation("month must be in 1..=12".into()));
    }
    Ok(())
}

pub fn validate_amount(amount: Option<Decimal>) -> Result<(), ModelError> {
    if let Some(a) = amount {
        if a.is_sign_negative() {
            return Err(ModelError::Validation("amount must not be negative".into()));
        }
    }
    Ok(())
}

/// Insert-or-replace the amount slot for (tenant, month).
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    month: i16,
    amount: Option<Decimal>,
) -> Result<Model, ModelError> {
    validate_month(month)?;
    validate_amount(amount)?;
    let now = Utc::now().into();
    if let Some(existing) = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::Month.eq(month))
        .one(db)
        .await
        .map_err(ModelError::from_db)?
    {
        let mut am: ActiveModel = existing.into();
        am.amount = Set(amount);
        am.updated_at = Set(now);
        am.update(db).await.map_err(ModelError::from_db)
    } else {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            month: Set(month),
            amount: Set(amount),
            updated_at: Set(now),
        };
        am.insert(db).await.map_err(ModelError::from_db)
    }
}

/// Configured rows only; callers expand to the 12-slot view.
pub async fn list_by_tenant<C: ConnectionTrait>(db: &C, tenant_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .order_by_asc(Column::Month)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

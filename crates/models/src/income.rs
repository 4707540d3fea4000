use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{income_type, tenant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub income_type_id: Uuid,
    pub date: Date,
    pub amount: Decimal,
    pub note: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tenant,
    IncomeType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tenant => Entity::belongs_to(tenant::Entity)
                .from(Column::TenantId)
                .to(tenant::Column::Id)
                .into(),
            Relation::IncomeType => Entity::belongs_to(income_type::Entity)
                .from(Column::IncomeTypeId)
                .to(income_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    income_type_id: Uuid,
    date: NaiveDate,
    amount: Decimal,
    note: Option<String>,
) -> Result<Model, ModelError> {
    if amount.is_sign_negative() {
        return Err(ModelError::Validation("amount must not be negative".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        income_type_id: Set(income_type_id),
        date: Set(date),
        amount: Set(amount),
        note: Set(note),
        active: Set(true),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Active income entries for a tenant, newest first, optional date window.
pub async fn list_by_tenant<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: u64,
    offset: u64,
) -> Result<Vec<Model>, ModelError> {
    let mut query = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::Active.eq(true));
    if let Some(from) = from {
        query = query.filter(Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(Column::Date.lte(to));
    }
    query
        .order_by_desc(Column::Date)
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

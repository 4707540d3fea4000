use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{Condition, ConnectionTrait, DbErr, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{member, tenant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub year: i32,
    pub month: i16,
    /// Captured from the fee schedule at registration; later schedule edits
    /// never rewrite history.
    pub amount: Decimal,
    pub paid_on: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tenant,
    Member,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tenant => Entity::belongs_to(tenant::Entity)
                .from(Column::TenantId)
                .to(tenant::Column::Id)
                .into(),
            Relation::Member => Entity::belongs_to(member::Entity)
                .from(Column::MemberId)
                .to(member::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Outcome of a single ledger insert attempt.
pub enum InsertOutcome {
    Inserted(Model),
    /// The (tenant, member, year, month) key already holds a payment.
    AlreadyPaid,
}

/// Insert one ledger row, skipping silently when the month is already paid.
///
/// Maps to `INSERT ... ON CONFLICT DO NOTHING RETURNING *`: concurrent
/// registrations race on the unique index and exactly one wins; the losers
/// see `AlreadyPaid`, never an error.
pub async fn insert_skip_duplicate<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    member_id: Uuid,
    year: i32,
    month: i16,
    amount: Decimal,
    paid_on: NaiveDate,
) -> Result<InsertOutcome, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        member_id: Set(member_id),
        year: Set(year),
        month: Set(month),
        amount: Set(amount),
        paid_on: Set(paid_on),
        created_at: Set(Utc::now().into()),
    };
    let insert = Entity::insert(am).on_conflict(
        OnConflict::columns([Column::TenantId, Column::MemberId, Column::Year, Column::Month])
            .do_nothing()
            .to_owned(),
    );
    match insert.exec_with_returning(db).await {
        Ok(model) => Ok(InsertOutcome::Inserted(model)),
        Err(DbErr::RecordNotInserted) => Ok(InsertOutcome::AlreadyPaid),
        Err(e) => Err(ModelError::from_db(e)),
    }
}

/// One member's payments for a year, ascending by month.
pub async fn list_for_member<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    member_id: Uuid,
    year: i32,
) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::MemberId.eq(member_id))
        .filter(Column::Year.eq(year))
        .order_by_asc(Column::Month)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

/// All payments a roster summary needs: the requested year plus the prior
/// December, which the previous-month tolerance consults when the
/// reference date falls in January. One query per tenant, no N+1.
pub async fn list_for_tenant_year<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    year: i32,
) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(
            Condition::any()
                .add(Column::Year.eq(year))
                .add(Condition::all().add(Column::Year.eq(year - 1)).add(Column::Month.eq(12))),
        )
        .order_by_asc(Column::MemberId)
        .order_by_asc(Column::Month)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

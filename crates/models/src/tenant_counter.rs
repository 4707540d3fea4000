use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::tenant;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenant_counter")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tenant_id: Uuid,
    pub next_member_number: i32,
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

/// Allocate the next member number for a tenant.
///
/// Runs inside the caller's transaction. The counter row is created lazily
/// (insert-if-absent, starting at 1); the increment-and-read is a single
/// conditional UPDATE returning the pre-increment value, so two concurrent
/// callers can never observe the same number. If the surrounding
/// transaction rolls back, the number is skipped, never reused.
pub async fn allocate<C: ConnectionTrait>(conn: &C, tenant_id: Uuid) -> Result<i32, ModelError> {
    let ensure = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        r#"INSERT INTO tenant_counter (tenant_id, next_member_number)
           VALUES ($1, 1)
           ON CONFLICT (tenant_id) DO NOTHING"#,
        [tenant_id.into()],
    );
    conn.execute(ensure).await.map_err(ModelError::from_db)?;

    let take = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        r#"UPDATE tenant_counter
           SET next_member_number = next_member_number + 1
           WHERE tenant_id = $1
           RETURNING (next_member_number - 1) AS member_number"#,
        [tenant_id.into()],
    );
    let row = conn
        .query_one(take)
        .await
        .map_err(ModelError::from_db)?
        .ok_or_else(|| ModelError::Db("counter row vanished during allocation".into()))?;
    let number: i32 = row
        .try_get("", "member_number")
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(number)
}

use chrono::{NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::tenant;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_number: i32,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone: Option<String>,
    pub birth_date: Date,
    pub join_date: Option<Date>,
    pub active: bool,
    /// Terminal override: a scholarship member is always "current".
    pub scholarship: bool,
    pub created_at: DateTimeWithTimeZone,
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

/// Fields supplied by the caller when creating a member; the number comes
/// from the allocator unless explicitly provided.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub join_date: Option<NaiveDate>,
    pub active: bool,
    pub scholarship: bool,
}

pub fn validate_new(input: &NewMember) -> Result<(), ModelError> {
    let mut missing = Vec::new();
    if input.document_number.trim().is_empty() {
        missing.push("document_number");
    }
    if input.first_name.trim().is_empty() {
        missing.push("first_name");
    }
    if input.last_name.trim().is_empty() {
        missing.push("last_name");
    }
    if input.category.trim().is_empty() {
        missing.push("category");
    }
    if !missing.is_empty() {
        return Err(ModelError::Validation(format!("missing required fields: {}", missing.join(", "))));
    }
    Ok(())
}

/// Insert a member row. A unique violation (member number or document
/// within the tenant) surfaces as `ModelError::Conflict`.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    member_number: i32,
    input: &NewMember,
) -> Result<Model, ModelError> {
    validate_new(input)?;
    if member_number < 1 {
        return Err(ModelError::Validation("member_number must be >= 1".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        member_number: Set(member_number),
        document_number: Set(input.document_number.trim().to_string()),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        category: Set(input.category.trim().to_string()),
        phone: Set(input.phone.clone()),
        birth_date: Set(input.birth_date),
        join_date: Set(input.join_date),
        active: Set(input.active),
        scholarship: Set(input.scholarship),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_in_tenant<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    member_id: Uuid,
) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(member_id)
        .filter(Column::TenantId.eq(tenant_id))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

pub async fn list_by_tenant<C: ConnectionTrait>(db: &C, tenant_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .order_by_asc(Column::MemberNumber)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{tenant, user};

/// Role labels stored in the `role` column. `PlatformAdmin` grants carry a
/// NULL tenant and satisfy the access guard for every tenant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MemberStaff,
    TenantAdmin,
    PlatformAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MemberStaff => "member_staff",
            Role::TenantAdmin => "tenant_admin",
            Role::PlatformAdmin => "platform_admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s {
            "member_staff" => Ok(Role::MemberStaff),
            "tenant_admin" => Ok(Role::TenantAdmin),
            "platform_admin" => Ok(Role::PlatformAdmin),
            other => Err(ModelError::Validation(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role_grant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Tenant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Tenant => Entity::belongs_to(tenant::Entity)
                .from(Column::TenantId)
                .to(tenant::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Upsert a grant: a principal holds at most one role per tenant (NULL
/// tenant = the platform-wide slot). Editing replaces the role label.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    tenant_id: Option<Uuid>,
    role: Role,
) -> Result<Model, ModelError> {
    if role == Role::PlatformAdmin && tenant_id.is_some() {
        return Err(ModelError::Validation("platform_admin grants are tenant independent".into()));
    }
    if role != Role::PlatformAdmin && tenant_id.is_none() {
        return Err(ModelError::Validation("tenant-scoped roles require a tenant".into()));
    }

    let mut query = Entity::find().filter(Column::UserId.eq(user_id));
    query = match tenant_id {
        Some(t) => query.filter(Column::TenantId.eq(t)),
        None => query.filter(Column::TenantId.is_null()),
    };

    if let Some(existing) = query.one(db).await.map_err(ModelError::from_db)? {
        let mut am: ActiveModel = existing.into();
        am.role = Set(role.as_str().to_string());
        am.update(db).await.map_err(ModelError::from_db)
    } else {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            tenant_id: Set(tenant_id),
            role: Set(role.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        };
        am.insert(db).await.map_err(ModelError::from_db)
    }
}

pub async fn for_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn role_labels_round_trip() {
        for role in [Role::MemberStaff, Role::TenantAdmin, Role::PlatformAdmin] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
        assert!(Role::parse("superuser").is_err());
    }
}

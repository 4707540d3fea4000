use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use models::tenant;

use crate::errors::ServiceError;

/// Create a tenant.
pub async fn create_tenant(db: &DatabaseConnection, name: &str) -> Result<tenant::Model, ServiceError> {
    let created = tenant::create(db, name).await?;
    Ok(created)
}

/// Get tenant by id.
pub async fn get_tenant(db: &DatabaseConnection, id: Uuid) -> Result<Option<tenant::Model>, ServiceError> {
    Ok(tenant::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

pub async fn list_tenants(db: &DatabaseConnection) -> Result<Vec<tenant::Model>, ServiceError> {
    tenant::Entity::find()
        .order_by_asc(tenant::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update tenant name.
pub async fn update_tenant_name(db: &DatabaseConnection, id: Uuid, name: &str) -> Result<tenant::Model, ServiceError> {
    tenant::validate_name(name)?;
    let mut am: tenant::ActiveModel = tenant::Entity::find_by_id(id)
        .one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("tenant"))?
        .into();
    am.name = Set(name.to_string());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Hard delete tenant. Members, schedule, ledger, and income rows cascade.
pub async fn delete_tenant(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    tenant::Entity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn tenant_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let name = format!("svc_tenant_{}", Uuid::new_v4());
        let t = create_tenant(&db, &name).await?;
        assert_eq!(t.name, name);

        let found = get_tenant(&db, t.id).await?.unwrap();
        assert_eq!(found.id, t.id);

        let new_name = format!("renamed_{}", Uuid::new_v4());
        let updated = update_tenant_name(&db, t.id, &new_name).await?;
        assert_eq!(updated.name, new_name);

        delete_tenant(&db, t.id).await?;
        let after = get_tenant(&db, t.id).await?;
        assert!(after.is_none());

        Ok(())
    }
}

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::role_grant::{self, Role};
use models::{user, user_credentials};

use crate::auth::domain::{AuthUser, Credentials, Grant};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_user(u: user::Model) -> AuthUser {
    AuthUser { id: u.id, email: u.email, name: u.name, active: u.active }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_user))
    }

    async fn create_user(&self, email: &str, name: &str) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, email, name)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(to_user(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = user_credentials::Entity::find()
            .filter(user_credentials::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<Credentials, AuthError> {
        let c = user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }

    async fn grants_for(&self, user_id: Uuid) -> Result<Vec<Grant>, AuthError> {
        let rows = role_grant::for_user(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        rows.into_iter()
            .map(|g| {
                let role = Role::parse(&g.role)
                    .map_err(|e| AuthError::Repository(e.to_string()))?;
                Ok(Grant { tenant_id: g.tenant_id, role })
            })
            .collect()
    }

    async fn upsert_grant(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        role: Role,
    ) -> Result<Grant, AuthError> {
        let g = role_grant::upsert(&self.db, user_id, tenant_id, role)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let role = Role::parse(&g.role).map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Grant { tenant_id: g.tenant_id, role })
    }
}

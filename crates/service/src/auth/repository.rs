use async_trait::async_trait;
use uuid::Uuid;

use models::role_grant::Role;

use super::domain::{AuthUser, Credentials, Grant};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, email: &str, name: &str) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<Credentials, AuthError>;

    async fn grants_for(&self, user_id: Uuid) -> Result<Vec<Grant>, AuthError>;
    async fn upsert_grant(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        role: Role,
    ) -> Result<Grant, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: email (lowercase)
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
        grants: Mutex<HashMap<Uuid, Vec<Grant>>>, // key: user_id
    }

    impl MockAuthRepository {
        /// Flip the active flag; lets tests exercise the inactive-user path.
        pub fn set_active(&self, user_id: Uuid, active: bool) {
            let mut users = self.users.lock().unwrap();
            for user in users.values_mut() {
                if user.id == user_id {
                    user.active = active;
                }
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&email.to_lowercase()).cloned())
        }

        async fn create_user(&self, email: &str, name: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            let key = email.to_lowercase();
            if users.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: key.clone(),
                name: name.to_string(),
                active: true,
            };
            users.insert(key, user.clone());
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(
            &self,
            user_id: Uuid,
            password_hash: String,
            password_algorithm: String,
        ) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }

        async fn grants_for(&self, user_id: Uuid) -> Result<Vec<Grant>, AuthError> {
            let grants = self.grants.lock().unwrap();
            Ok(grants.get(&user_id).cloned().unwrap_or_default())
        }

        async fn upsert_grant(
            &self,
            user_id: Uuid,
            tenant_id: Option<Uuid>,
            role: Role,
        ) -> Result<Grant, AuthError> {
            let mut grants = self.grants.lock().unwrap();
            let list = grants.entry(user_id).or_default();
            let grant = Grant { tenant_id, role };
            if let Some(slot) = list.iter_mut().find(|g| g.tenant_id == tenant_id) {
                *slot = grant;
            } else {
                list.push(grant);
            }
            Ok(grant)
        }
    }
}

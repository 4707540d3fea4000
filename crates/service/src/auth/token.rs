use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{AuthUser, Grant};
use super::errors::AuthError;

/// Bearer token payload. Grants are embedded at login time; a token issued
/// before a grant change keeps its old grants until it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: Uuid,
    pub name: String,
    pub grants: Vec<Grant>,
    pub exp: usize,
}

pub fn issue(
    secret: &str,
    ttl_hours: i64,
    user: &AuthUser,
    grants: &[Grant],
) -> Result<String, AuthError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id,
        name: user.name.clone(),
        grants: grants.to_vec(),
        exp,
    };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

pub fn verify(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::TokenError(e.to_string()))
}

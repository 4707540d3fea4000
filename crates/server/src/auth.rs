use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::auth::token::{self, Claims};
use service::dues::repo::seaorm::SeaOrmDuesRepository;
use service::dues::DuesService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig {
                jwt_secret: self.auth.jwt_secret.clone(),
                token_ttl_hours: self.auth.token_ttl_hours,
                password_algorithm: "argon2".into(),
            },
        )
    }

    pub fn dues_service(&self) -> DuesService<SeaOrmDuesRepository> {
        let repo = Arc::new(SeaOrmDuesRepository { db: self.db.clone() });
        DuesService::new(repo)
    }
}

fn is_public(req: &Request) -> bool {
    if req.method() == Method::OPTIONS {
        return true;
    }
    let path = req.uri().path();
    path == "/health" || (path == "/auth/login" && req.method() == Method::POST)
}

/// Decode the bearer token once per request and stash the claim set in
/// request extensions. Handlers read grants from there; they never hit the
/// database for roles.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public(&req) {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
    let raw = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;

    let claims: Claims = token::verify(&state.auth.jwt_secret, raw)
        .map_err(|_| ApiError::Unauthorized("invalid token".into()))?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use service::auth::domain::LoginInput;
use service::auth::token::Claims;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email the principal registered with.
    pub identity: String,
    pub password: String,
}

pub async fn login(
    State(state): State<ServerState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = state
        .auth_service()
        .login(LoginInput { email: body.identity, password: body.password })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "token": session.token,
        "principal": {
            "id": session.user.id,
            "email": session.user.email,
            "name": session.user.name,
            "grants": session.grants,
        },
    })))
}

pub async fn me(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "principal": {
            "id": claims.uid,
            "email": claims.sub,
            "name": claims.name,
            "grants": claims.grants,
        },
    }))
}

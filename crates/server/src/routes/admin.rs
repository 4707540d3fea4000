use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::role_grant::Role;
use service::access;
use service::auth::domain::RegisterInput;
use service::auth::token::Claims;
use service::tenant_service;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
}

pub async fn create_tenant(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<CreateTenantRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    let tenant = tenant_service::create_tenant(&state.db, &body.name).await?;
    Ok(Json(json!({"ok": true, "tenant": tenant})))
}

pub async fn list_tenants(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    let tenants = tenant_service::list_tenants(&state.db).await?;
    Ok(Json(json!({"ok": true, "tenants": tenants})))
}

pub async fn rename_tenant(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<CreateTenantRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    let tenant = tenant_service::update_tenant_name(&state.db, tenant_id, &body.name).await?;
    Ok(Json(json!({"ok": true, "tenant": tenant})))
}

pub async fn delete_tenant(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    tenant_service::delete_tenant(&state.db, tenant_id).await?;
    Ok(Json(json!({"ok": true})))
}

pub async fn create_user(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<RegisterInput>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    let user = state.auth_service().register(body).await?;
    Ok(Json(json!({"ok": true, "user": {"id": user.id, "email": user.email, "name": user.name}})))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub user_id: Uuid,
    /// Omitted only for the platform_admin role.
    pub tenant_id: Option<Uuid>,
    pub role: String,
}

pub async fn grant_role(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<GrantRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_platform_admin(&claims.grants)?;
    let role = Role::parse(&body.role).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let grant = state.auth_service().grant(body.user_id, body.tenant_id, role).await?;
    Ok(Json(json!({"ok": true, "grant": grant})))
}

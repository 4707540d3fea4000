use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::member::NewMember;
use service::access;
use service::auth::token::Claims;
use service::members;

use crate::auth::ServerState;
use crate::errors::ApiError;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    /// Explicit number for imports/backfills; omitted = allocator assigns.
    pub member_number: Option<i32>,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub join_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub scholarship: bool,
}

pub async fn create_member(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<CreateMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let input = NewMember {
        document_number: body.document_number,
        first_name: body.first_name,
        last_name: body.last_name,
        category: body.category,
        phone: body.phone,
        birth_date: body.birth_date,
        join_date: body.join_date,
        active: body.active,
        scholarship: body.scholarship,
    };
    let member = members::create_member(&state.db, tenant_id, body.member_number, input).await?;
    Ok(Json(json!({"ok": true, "member": member})))
}

pub async fn get_member(
    State(state): State<ServerState>,
    Path((tenant_id, member_id)): Path<(Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let member = members::get_member(&state.db, tenant_id, member_id).await?;
    Ok(Json(json!({"ok": true, "member": member})))
}

pub async fn list_members(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let members = members::list_members(&state.db, tenant_id).await?;
    Ok(Json(json!({"ok": true, "members": members})))
}

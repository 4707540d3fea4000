use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::access;
use service::auth::token::Claims;
use service::schedule;

use crate::auth::ServerState;
use crate::errors::ApiError;

pub async fn list_fees(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let entries = schedule::list_schedule(&state.db, tenant_id).await?;
    Ok(Json(json!({"ok": true, "entries": entries})))
}

#[derive(Debug, Deserialize)]
pub struct SetFeeRequest {
    /// `null` clears the month back to unconfigured.
    pub amount: Option<Decimal>,
}

pub async fn set_fee(
    State(state): State<ServerState>,
    Path((tenant_id, month)): Path<(Uuid, i16)>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<SetFeeRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant_admin(&claims.grants, tenant_id)?;
    let entry = schedule::set_month_amount(&state.db, tenant_id, month, body.amount).await?;
    Ok(Json(json!({"ok": true, "entry": entry})))
}

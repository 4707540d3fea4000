use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::access;
use service::auth::token::Claims;
use service::income;
use service::pagination::Pagination;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct IncomeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub async fn list_income(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<IncomeQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let page = Pagination { limit: query.limit, offset: query.offset };
    let report = income::list_income(&state.db, tenant_id, query.from, query.to, page).await?;
    Ok(Json(json!({"ok": true, "income": report.entries, "total": report.total})))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIncomeRequest {
    pub type_id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
}

pub async fn record_income(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<RecordIncomeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let entry =
        income::record_income(&state.db, tenant_id, body.type_id, body.date, body.amount, body.note)
            .await?;
    Ok((StatusCode::CREATED, Json(json!({"ok": true, "entry": entry}))))
}

#[derive(Debug, Deserialize)]
pub struct CreateTypeRequest {
    pub name: String,
}

pub async fn create_type(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<CreateTypeRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant_admin(&claims.grants, tenant_id)?;
    let kind = income::create_income_type(&state.db, tenant_id, &body.name).await?;
    Ok(Json(json!({"ok": true, "incomeType": kind})))
}

pub async fn list_types(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let kinds = income::list_income_types(&state.db, tenant_id).await?;
    Ok(Json(json!({"ok": true, "incomeTypes": kinds})))
}

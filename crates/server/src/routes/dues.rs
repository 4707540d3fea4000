use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::access;
use service::auth::token::Claims;
use service::dues::domain::RegistrationInput;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    fn resolve(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

/// Reference date for the standing classification. For the running year it
/// is today; for any other year it is that year's December 31st, so a past
/// roster reflects how it stood at year end instead of marking everyone
/// delinquent.
fn reference_for(year: i32, today: NaiveDate) -> NaiveDate {
    if today.year() == year {
        today
    } else {
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today)
    }
}

pub async fn summary(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<YearQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let year = query.resolve();
    let reference = reference_for(year, Utc::now().date_naive());
    let rows = state.dues_service().roster_summary(tenant_id, year, reference).await?;

    let members: Vec<Value> = rows
        .iter()
        .map(|row| {
            json!({
                "id": row.member.id,
                "memberNumber": row.member.member_number,
                "name": format!("{} {}", row.member.first_name, row.member.last_name),
                "category": row.member.category,
                "scholarship": row.member.scholarship,
                "paidMonths": row.paid_months,
                "current": row.current,
            })
        })
        .collect();
    Ok(Json(json!({"ok": true, "year": year, "members": members})))
}

pub async fn member_statement(
    State(state): State<ServerState>,
    Path((tenant_id, member_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<YearQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let year = query.resolve();
    let reference = reference_for(year, Utc::now().date_naive());
    let statement = state
        .dues_service()
        .member_statement(tenant_id, member_id, year, reference)
        .await?;

    let entries: Vec<Value> = statement
        .payments
        .iter()
        .map(|p| json!({"month": p.month, "amount": p.amount, "date": p.paid_on}))
        .collect();
    Ok(Json(json!({
        "ok": true,
        "year": year,
        "entries": entries,
        "paidMonths": statement.paid_months,
        "current": statement.current,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub member_id: Uuid,
    pub year: i32,
    pub months: Vec<i16>,
    pub date: NaiveDate,
}

pub async fn register(
    State(state): State<ServerState>,
    Path(tenant_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    access::require_tenant(&claims.grants, tenant_id)?;
    let outcome = state
        .dues_service()
        .register(tenant_id, RegistrationInput {
            member_id: body.member_id,
            year: body.year,
            months: body.months,
            paid_on: body.date,
        })
        .await?;

    let inserted: Vec<Value> = outcome
        .inserted
        .iter()
        .map(|p| json!({"month": p.month, "amount": p.amount, "date": p.paid_on}))
        .collect();
    Ok(Json(json!({
        "ok": true,
        "insertedCount": outcome.inserted_count,
        "inserted": inserted,
    })))
}

use axum::middleware;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;

use crate::auth::{require_bearer, ServerState};

pub mod admin;
pub mod auth;
pub mod dues;
pub mod fees;
pub mod income;
pub mod members;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public health/login, tenant-scoped
/// operations, and platform-admin routes. The bearer middleware covers
/// everything; public paths are whitelisted inside it.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new().route("/health", get(health));

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me));

    let tenant_routes = Router::new()
        .route("/tenant/:tenant_id/config/fees", get(fees::list_fees))
        .route("/tenant/:tenant_id/config/fees/:month", post(fees::set_fee))
        .route(
            "/tenant/:tenant_id/config/income-types",
            get(income::list_types).post(income::create_type),
        )
        .route("/tenant/:tenant_id/dues/summary", get(dues::summary))
        .route("/tenant/:tenant_id/dues/:member_id", get(dues::member_statement))
        .route("/tenant/:tenant_id/dues", post(dues::register))
        .route(
            "/tenant/:tenant_id/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/tenant/:tenant_id/members/:member_id", get(members::get_member))
        .route("/tenant/:tenant_id/income", get(income::list_income).post(income::record_income));

    let admin_routes = Router::new()
        .route("/admin/tenants", get(admin::list_tenants).post(admin::create_tenant))
        .route(
            "/admin/tenants/:tenant_id",
            put(admin::rename_tenant).delete(admin::delete_tenant),
        )
        .route("/admin/users", post(admin::create_user))
        .route("/admin/grants", post(admin::grant_role));

    public
        .merge(auth_routes)
        .merge(tenant_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

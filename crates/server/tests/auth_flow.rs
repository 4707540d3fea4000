use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use models::role_grant::Role;
use server::auth::{ServerAuthConfig, ServerState};
use server::routes;
use service::auth::domain::RegisterInput;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

const TEST_SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect().await?;
    // Concurrent test binaries may race on the migration table; applied
    // schema is fine either way.
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }
    let state = ServerState {
        db: db.clone(),
        auth: ServerAuthConfig { jwt_secret: TEST_SECRET.into(), token_ttl_hours: 8 },
    };
    Ok((routes::build_router(state, cors()), db))
}

fn auth_service(db: &DatabaseConnection) -> AuthService<SeaOrmAuthRepository> {
    AuthService::new(
        Arc::new(SeaOrmAuthRepository { db: db.clone() }),
        AuthConfig {
            jwt_secret: TEST_SECRET.into(),
            token_ttl_hours: 8,
            password_algorithm: "argon2".into(),
        },
    )
}

async fn seed_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    tenant_id: Option<Uuid>,
    role: Role,
) -> anyhow::Result<Uuid> {
    let svc = auth_service(db);
    let user = svc
        .register(RegisterInput { email: email.into(), name: "Tester".into(), password: password.into() })
        .await?;
    svc.grant(user.id, tenant_id, role).await?;
    Ok(user.id)
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn login_request(email: &str, password: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"identity": email, "password": password}))?))?)
}

#[tokio::test]
async fn test_login_and_me_flow() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let tenant = models::tenant::create(&db, &format!("auth_flow_{}", Uuid::new_v4())).await?;
    let email = format!("staff_{}@example.com", Uuid::new_v4());
    seed_user(&db, &email, "S3curePass!", Some(tenant.id), Role::MemberStaff).await?;

    let resp = app.call(login_request(&email, "S3curePass!")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["ok"], json!(true));
    let token = body["token"].as_str().expect("token in login body").to_string();
    assert_eq!(body["principal"]["email"], json!(email));

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["principal"]["email"], json!(email));
    assert_eq!(body["principal"]["grants"][0]["role"], json!("member_staff"));
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let email = format!("wrongpw_{}@example.com", Uuid::new_v4());
    seed_user(&db, &email, "StrongPass123", None, Role::PlatformAdmin).await?;

    let resp = app.call(login_request(&email, "wrong")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await?;
    assert_eq!(body["ok"], json!(false));
    Ok(())
}

#[tokio::test]
async fn test_inactive_user_cannot_login() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let email = format!("inactive_{}@example.com", Uuid::new_v4());
    let user_id = seed_user(&db, &email, "S3curePass!", None, Role::PlatformAdmin).await?;
    models::user::set_active(&db, user_id, false).await?;

    let resp = app.call(login_request(&email, "S3curePass!")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let req = Request::builder().method("GET").uri("/auth/me").body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token is 401 too, not 500.
    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_health_is_public() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let req = Request::builder().method("GET").uri("/health").body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tower::Service;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, ServerState};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub fn skip_db() -> bool {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        eprintln!("Skipping DB-dependent test due to SKIP_DB_TESTS");
        return true;
    }
    false
}

/// Fresh connection per test; pools do not survive across test runtimes.
pub async fn db() -> DatabaseConnection {
    let db = models::db::connect_with_config(&configs::DatabaseConfig::from_env())
        .await
        .expect("connect test database");
    MIGRATED
        .get_or_init(|| async {
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("migrations notice: {e}");
            }
        })
        .await;
    db
}

pub async fn app() -> Router {
    let settings = configs::AuthSettings { jwt_secret: "test-secret".into(), token_ttl_hours: 1, cookie_secure: false };
    routes::build_router(ServerState::new(db().await, &settings), CorsLayer::very_permissive())
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", Uuid::new_v4().simple())
}

pub async fn call(app: &mut Router, req: Request<Body>) -> Response {
    app.call(req).await.expect("router is infallible")
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Register through the API and return `(token, user id)`.
pub async fn register(app: &mut Router, role: &str, city: &str) -> (String, Uuid) {
    let req = json_request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": format!("{role} user"),
            "email": unique_email(role),
            "password": "password123",
            "role": role,
            "city": city,
        })),
    );
    let resp = call(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let id = body["id"].as_str().and_then(|s| s.parse().ok()).expect("user id");
    (body["token"].as_str().expect("token").to_string(), id)
}

/// Admins cannot self-register; insert one directly and log in.
pub async fn admin_token(app: &mut Router) -> String {
    let email = unique_email("admin");
    let password_hash = service::auth::password::hash_password("admin123").expect("hash");
    models::user::create(
        &db().await,
        models::user::NewUser {
            name: "Admin User".into(),
            email: email.clone(),
            password_hash,
            role: models::user::Role::Admin,
            city: "New York".into(),
        },
    )
    .await
    .expect("insert admin");
    let resp = call(app, json_request("POST", "/api/auth/login", None, Some(json!({"email": email, "password": "admin123"})))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["token"].as_str().expect("token").to_string()
}

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use server::auth::jwt::create_access_token;
use server::auth::password::hash_password;
use server::gateway::SchoolGateway;
use server::storage::{InlineObjectStore, LogoStore};
use shared_types::UserRole;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Global mutex ensuring tests run sequentially against the shared database.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

pub const EXPORT_BASE_URL: &str = "https://files.test/exports";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Seeded accounts, one per role.
pub struct Users {
    pub admin_token: String,
    pub editor_token: String,
    pub viewer_token: String,
    pub editor_id: i64,
}

/// Build a test router backed by a real Postgres pool.
/// Acquires the global lock, truncates every table and seeds one user per
/// role. Hold the returned guard for the whole test.
pub async fn test_app() -> (Router, Pool<Postgres>, Users, tokio::sync::MutexGuard<'static, ()>) {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();
    if std::env::var("JWT_SECRET").map(|s| s.is_empty()).unwrap_or(true) {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE school_admins, classes, schools, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate");

    let users = seed_users(&pool).await;

    let gateway = SchoolGateway::new(
        pool.clone(),
        LogoStore::Inline(InlineObjectStore),
        EXPORT_BASE_URL,
    );
    let state = server::db::AppState::new(gateway);
    // Permissive auth so Bearer tokens resolve to a caller; anonymous
    // requests still pass through.
    let router = server::openapi::api_router(state)
        .layer(middleware::from_fn(server::auth::middleware::auth_middleware));

    (router, pool, users, guard)
}

async fn seed_users(pool: &Pool<Postgres>) -> Users {
    let hash = hash_password(TEST_PASSWORD).expect("hash");
    let mut tokens = Vec::new();
    let mut editor_id = 0;
    for (email, name, role) in [
        ("admin@schools.test", "Avery Admin", UserRole::Admin),
        ("editor@schools.test", "Emery Editor", UserRole::Editor),
        ("viewer@schools.test", "Val Viewer", UserRole::Viewer),
    ] {
        let row = server::repo::user::upsert(pool, email, &hash, name, role)
            .await
            .expect("Failed to seed user");
        if role == UserRole::Editor {
            editor_id = row.id;
        }
        tokens.push(create_access_token(row.id, email, role).expect("token"));
    }
    let mut tokens = tokens.into_iter();
    Users {
        admin_token: tokens.next().unwrap(),
        editor_token: tokens.next().unwrap(),
        viewer_token: tokens.next().unwrap(),
        editor_id,
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, None)).await
}

pub async fn get_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, Some(token), None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request("POST", uri, token, Some(body))).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request("PUT", uri, token, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request("DELETE", uri, token, None)).await
}

/// Send a request and return status, headers and the parsed body.
pub async fn send_with_headers(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, headers, body)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_with_headers(app, req).await;
    (status, body)
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    request(
        "POST",
        "/api/auth/login",
        None,
        Some(&serde_json::json!({ "email": email, "password": password })),
    )
}

/// A valid create/update body.
pub fn school_body(name: &str, email: &str, status: bool) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "",
        "address": "123 Education Avenue",
        "status": status,
    })
}

/// Create a school through the API as the editor and return the response body.
pub async fn create_school(app: &Router, users: &Users, name: &str, email: &str, status: bool) -> Value {
    let (code, body) = post_json(
        app,
        "/api/schools",
        &school_body(name, email, status),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "create failed: {body}");
    body
}

/// Insert child rows so the derived counts are non-zero.
pub async fn add_classes(pool: &Pool<Postgres>, school_id: &str, count: usize) {
    let id = uuid::Uuid::parse_str(school_id).expect("school id");
    for n in 0..count {
        sqlx::query("INSERT INTO classes (school_id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(format!("Class {}", n + 1))
            .execute(pool)
            .await
            .expect("Failed to seed class");
    }
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|s| s["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, test_app};

#[tokio::test]
async fn openapi_document_lists_school_paths() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/schools",
        "/api/schools/{id}",
        "/api/schools/export",
        "/api/auth/login",
        "/health",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn health_reports_database_and_inline_logos() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "connected");
    assert_eq!(body["logo_storage"], "inline");
    assert_eq!(body["schools"], 0);
}

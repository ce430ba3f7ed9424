use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, test_app, EXPORT_BASE_URL};

#[tokio::test]
async fn export_returns_url_per_format() {
    let (app, _pool, _users, _guard) = test_app().await;

    for format in ["csv", "excel", "pdf"] {
        let (status, body) = get(&app, &format!("/api/schools/export?format={}", format)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], format);
        assert_eq!(body["url"], format!("{}/schools.{}", EXPORT_BASE_URL, format));
    }
}

#[tokio::test]
async fn unknown_format_is_400() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = get(&app, "/api/schools/export?format=docx").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

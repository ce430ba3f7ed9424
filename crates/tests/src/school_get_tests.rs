use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{create_school, get, test_app};

#[tokio::test]
async fn get_returns_the_stored_school() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Westview High");
    assert_eq!(body["status"], "active");
    assert_eq!(body["created_by"], users.editor_id);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = get(&app, &format!("/api/schools/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn malformed_id_is_404() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, _) = get(&app, "/api/schools/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

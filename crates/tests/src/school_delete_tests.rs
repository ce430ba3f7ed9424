use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{add_classes, create_school, delete, get, test_app};

#[tokio::test]
async fn delete_removes_school_from_later_lists() {
    let (app, pool, users, _guard) = test_app().await;

    let doomed = create_school(&app, &users, "Doomed School", "d@doomed.edu", true).await;
    create_school(&app, &users, "Kept School", "k@kept.edu", true).await;
    let id = doomed["id"].as_str().unwrap();
    add_classes(&pool, id, 2).await;

    let (status, body) = delete(&app, &format!("/api/schools/{}", id), Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (_, list) = get(&app, "/api/schools?status=all").await;
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&id));
    assert_eq!(ids.len(), 1);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn delete_missing_school_is_404() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, body) = delete(
        &app,
        &format!("/api/schools/{}", uuid::Uuid::new_v4()),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn anonymous_delete_is_401() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = delete(&app, &format!("/api/schools/{}", id), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn viewer_delete_is_403() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = delete(&app, &format!("/api/schools/{}", id), Some(&users.viewer_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

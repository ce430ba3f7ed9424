use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_school, get, post_json, put_json, school_body, test_app};

fn timestamp(value: &serde_json::Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&chrono::Utc))
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

#[tokio::test]
async fn update_overwrites_fields() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let mut body = school_body("Westview Senior High", "front@westview.edu", false);
    body["phone"] = json!("555-0100");
    let (status, updated) = put_json(
        &app,
        &format!("/api/schools/{}", id),
        &body,
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Westview Senior High");
    assert_eq!(updated["email"], "front@westview.edu");
    assert_eq!(updated["phone"], "555-0100");
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(
        timestamp(&updated["updated_at"]) > timestamp(&created["updated_at"]),
        "updated_at not refreshed: {} -> {}",
        created["updated_at"],
        updated["updated_at"]
    );

    let (_, fetched) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["created_at"], created["created_at"]);
    assert_eq!(fetched["updated_at"], updated["updated_at"]);
}

#[tokio::test]
async fn update_rejects_padded_short_name() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/schools/{}", id),
        &school_body("  B  ", "office@westview.edu", true),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["field_errors"]["name"],
        "School name must be at least 2 characters."
    );

    let (_, fetched) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(fetched["name"], "Westview High");
}

#[tokio::test]
async fn update_without_logo_keeps_previous_logo() {
    let (app, _pool, users, _guard) = test_app().await;

    let mut body = school_body("Crest Academy", "crest@academy.edu", true);
    body["logo"] = json!({
        "file_name": "crest.png",
        "content_type": "image/png",
        "data": "iVBORw0KGgo=",
    });
    let (_, created) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    let id = created["id"].as_str().unwrap();
    let logo = created["logo"].clone();
    assert!(logo.is_string());

    let (status, updated) = put_json(
        &app,
        &format!("/api/schools/{}", id),
        &school_body("Crest Academy East", "crest@academy.edu", true),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["logo"], logo);

    let (_, fetched) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(fetched["logo"], logo);
    assert_eq!(fetched["name"], "Crest Academy East");
}

#[tokio::test]
async fn update_with_new_logo_replaces_it() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Crest Academy", "crest@academy.edu", true).await;
    let id = created["id"].as_str().unwrap();
    assert!(created.get("logo").is_none());

    let mut body = school_body("Crest Academy", "crest@academy.edu", true);
    body["logo"] = json!({
        "file_name": "crest.svg",
        "content_type": "image/svg+xml",
        "data": "PHN2Zy8+",
    });
    let (status, updated) = put_json(
        &app,
        &format!("/api/schools/{}", id),
        &body,
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["logo"], "data:image/svg+xml;base64,PHN2Zy8+");
}

#[tokio::test]
async fn update_missing_school_is_404() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, _) = put_json(
        &app,
        &format!("/api/schools/{}", uuid::Uuid::new_v4()),
        &school_body("Ghost School", "ghost@school.edu", true),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn viewer_update_is_forbidden() {
    let (app, _pool, users, _guard) = test_app().await;

    let created = create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = put_json(
        &app,
        &format!("/api/schools/{}", id),
        &school_body("Renamed", "office@westview.edu", true),
        Some(&users.viewer_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, fetched) = get(&app, &format!("/api/schools/{}", id)).await;
    assert_eq!(fetched["name"], "Westview High");
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, post_json, school_body, test_app};

#[tokio::test]
async fn editor_creates_school() {
    let (app, _pool, users, _guard) = test_app().await;

    let body = json!({
        "name": "Westview High",
        "email": "office@westview.edu",
        "phone": " +1 (555) 010-2000 ",
        "address": "12 Oak Street",
        "status": true,
    });
    let (status, created) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Westview High");
    assert_eq!(created["phone"], "+1 (555) 010-2000");
    assert_eq!(created["classes_count"], 0);
    assert!(created["id"].as_str().is_some());

    let (_, list) = get(&app, "/api/schools").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn inactive_school_is_stored_inactive() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, created) = post_json(
        &app,
        "/api/schools",
        &school_body("Dormant School", "d@dormant.edu", false),
        Some(&users.admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "inactive");
}

#[tokio::test]
async fn anonymous_create_is_401() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/schools",
        &school_body("Westview High", "office@westview.edu", true),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn viewer_create_hits_write_policy() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/schools",
        &school_body("Westview High", "office@westview.edu", true),
        Some(&users.viewer_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("row-level security"));

    let (_, list) = get(&app, "/api/schools?status=all").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn short_name_is_rejected_with_field_error() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/schools",
        &school_body("A", "office@westview.edu", true),
        Some(&users.editor_token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
    assert_eq!(
        body["field_errors"]["name"],
        "School name must be at least 2 characters."
    );
}

#[tokio::test]
async fn padding_does_not_lengthen_name_or_address() {
    let (app, pool, users, _guard) = test_app().await;

    let body = json!({
        "name": "A ",
        "email": "office@westview.edu",
        "address": "1234 ",
        "status": true,
    });
    let (status, body) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
    assert_eq!(
        body["field_errors"]["name"],
        "School name must be at least 2 characters."
    );
    assert_eq!(body["field_errors"]["address"], "Address must be at least 5 characters.");

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn bad_email_and_short_address_are_rejected() {
    let (app, _pool, users, _guard) = test_app().await;

    let body = json!({
        "name": "Westview High",
        "email": "not-an-email",
        "address": "1 St",
        "status": true,
    });
    let (status, body) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["email"], "Please enter a valid email address.");
    assert_eq!(body["field_errors"]["address"], "Address must be at least 5 characters.");
}

#[tokio::test]
async fn logo_is_stored_as_data_url_without_s3() {
    let (app, _pool, users, _guard) = test_app().await;

    let mut body = school_body("Crest Academy", "crest@academy.edu", true);
    body["logo"] = json!({
        "file_name": "crest.png",
        "content_type": "image/png",
        "data": "iVBORw0KGgo=",
    });
    let (status, created) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["logo"], "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn non_image_logo_is_rejected() {
    let (app, _pool, users, _guard) = test_app().await;

    let mut body = school_body("Crest Academy", "crest@academy.edu", true);
    body["logo"] = json!({
        "file_name": "notes.txt",
        "content_type": "text/plain",
        "data": "aGVsbG8=",
    });
    let (status, _) = post_json(&app, "/api/schools", &body, Some(&users.editor_token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

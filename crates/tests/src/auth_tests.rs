use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{get, get_authed, login_request, send_with_headers, test_app, TEST_PASSWORD};

#[tokio::test]
async fn login_returns_user_and_sets_cookie() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, headers, body) =
        send_with_headers(&app, login_request("editor@schools.test", TEST_PASSWORD)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "editor@schools.test");
    assert_eq!(body["user"]["role"], "editor");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    let cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.starts_with("schools_access="), "cookie: {cookie}");
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn email_lookup_ignores_case() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, _, _) =
        send_with_headers(&app, login_request("EDITOR@Schools.Test", TEST_PASSWORD)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, _, body) =
        send_with_headers(&app, login_request("editor@schools.test", "wrong-password")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn unknown_email_is_401() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, _, _) =
        send_with_headers(&app, login_request("nobody@schools.test", TEST_PASSWORD)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_a_token() {
    let (app, _pool, users, _guard) = test_app().await;

    let (status, _) = get(&app, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get_authed(&app, "/api/auth/me", &users.viewer_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Val Viewer");
    assert_eq!(body["role"], "viewer");
}

#[tokio::test]
async fn garbage_token_is_treated_as_anonymous() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, _) = get_authed(&app, "/api/schools", "not.a.jwt").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_authed(&app, "/api/auth/me", "not.a.jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

use axum::{extract::State, http::HeaderMap, Json};

use shared_types::{AppError, AuthResponse, AuthUser, LoginRequest};

use crate::auth::{cookies, extractors::AuthRequired};
use crate::gateway::SchoolGateway;

/// POST /api/auth/login
///
/// Returns the token in the body and also sets the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(gateway): State<SchoolGateway>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    let response = crate::auth::authenticate(gateway.pool(), &body).await?;
    let mut headers = HeaderMap::new();
    cookies::set_access_cookie(&mut headers, &response.access_token);
    Ok((headers, Json(response)))
}

/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = AuthUser),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
pub async fn me(
    State(gateway): State<SchoolGateway>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<AuthUser>, AppError> {
    crate::auth::current_user(gateway.pool(), &claims)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
}

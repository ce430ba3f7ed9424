use axum::{routing::get, Json, Router};
use shared_types::{
    AppError, AppErrorKind, AuthResponse, AuthUser, ExportFormat, ExportResponse, LoginRequest,
    LogoUpload, School, SchoolFormData, SchoolStatus, SchoolsFilter, SortField, SortOrder,
    StatusFilter, UserRole,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::{health, rest};

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::school::list_schools,
        rest::school::get_school,
        rest::school::create_school,
        rest::school::update_school,
        rest::school::delete_school,
        rest::school::export_schools,
        rest::auth::login,
        rest::auth::me,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        School, SchoolStatus, SchoolFormData, LogoUpload, SchoolsFilter,
        StatusFilter, SortField, SortOrder, ExportFormat, ExportResponse,
        LoginRequest, AuthUser, AuthResponse, UserRole,
        health::HealthResponse,
    )),
    tags(
        (name = "schools", description = "School management endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Schools Dashboard API",
        description = "School administration API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the REST API at `/api/*`, the
/// OpenAPI document at `/api-docs/openapi.json` and Scalar at `/docs`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", get(health::health_check))
        .with_state(state)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use shared_types::{AppError, ExportFormat, ExportResponse, School, SchoolFormData, SchoolsFilter};

use crate::auth::extractors::MaybeCaller;
use crate::gateway::SchoolGateway;

/// Query for `GET /api/schools/export`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// `csv`, `excel` or `pdf`.
    pub format: String,
}

/// GET /api/schools
#[utoipa::path(
    get,
    path = "/api/schools",
    params(SchoolsFilter),
    responses(
        (status = 200, description = "Schools matching the filter", body = Vec<School>),
        (status = 500, description = "Store failure", body = AppError)
    ),
    tag = "schools"
)]
pub async fn list_schools(
    State(gateway): State<SchoolGateway>,
    Query(filter): Query<SchoolsFilter>,
) -> Result<Json<Vec<School>>, AppError> {
    Ok(Json(gateway.list(&filter).await?))
}

/// GET /api/schools/{id}
#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    params(("id" = String, Path, description = "School UUID")),
    responses(
        (status = 200, description = "School found", body = School),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "schools"
)]
pub async fn get_school(
    State(gateway): State<SchoolGateway>,
    Path(id): Path<String>,
) -> Result<Json<School>, AppError> {
    gateway
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("School {} not found", id)))
}

/// POST /api/schools
#[utoipa::path(
    post,
    path = "/api/schools",
    request_body = SchoolFormData,
    responses(
        (status = 201, description = "School created", body = School),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Write not permitted", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "schools"
)]
pub async fn create_school(
    State(gateway): State<SchoolGateway>,
    MaybeCaller(caller): MaybeCaller,
    Json(body): Json<SchoolFormData>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = gateway.create(caller.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

/// PUT /api/schools/{id}
#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    params(("id" = String, Path, description = "School UUID")),
    request_body = SchoolFormData,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Write not permitted", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "schools"
)]
pub async fn update_school(
    State(gateway): State<SchoolGateway>,
    MaybeCaller(caller): MaybeCaller,
    Path(id): Path<String>,
    Json(body): Json<SchoolFormData>,
) -> Result<Json<School>, AppError> {
    Ok(Json(gateway.update(caller.as_ref(), &id, &body).await?))
}

/// DELETE /api/schools/{id}
#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    params(("id" = String, Path, description = "School UUID")),
    responses(
        (status = 204, description = "School deleted"),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Write not permitted", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "schools"
)]
pub async fn delete_school(
    State(gateway): State<SchoolGateway>,
    MaybeCaller(caller): MaybeCaller,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if gateway.delete(caller.as_ref(), &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("School {} not found", id)))
    }
}

/// GET /api/schools/export
#[utoipa::path(
    get,
    path = "/api/schools/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Export location", body = ExportResponse),
        (status = 400, description = "Unknown format", body = AppError)
    ),
    tag = "schools"
)]
pub async fn export_schools(
    State(gateway): State<SchoolGateway>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let format = ExportFormat::parse(&query.format).ok_or_else(|| {
        AppError::bad_request(format!("Unsupported export format: {}", query.format))
    })?;
    Ok(Json(ExportResponse {
        format,
        url: gateway.export_url(format),
    }))
}

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::db::AppState;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
    /// Rows in the schools table, absent when the store is unreachable.
    pub schools: Option<i64>,
    /// Where logos are written: `s3` or `inline`.
    pub logo_storage: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Liveness plus a store round trip.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schools")
        .fetch_one(&state.pool)
        .await;
    let (db, schools) = match count {
        Ok(n) => ("connected".to_string(), Some(n)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the store");
            (format!("error: {e}"), None)
        }
    };

    let logo_storage = if crate::config::feature_flags().s3 { "s3" } else { "inline" };

    Json(HealthResponse {
        status: "ok".to_string(),
        db,
        schools,
        logo_storage: logo_storage.to_string(),
        uptime_seconds: START_TIME.get().map_or(0, |t| t.elapsed().as_secs()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub mod auth;
pub mod school;

use axum::{routing::{get, post}, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Schools
        .route("/api/schools", get(school::list_schools).post(school::create_school))
        .route("/api/schools/export", get(school::export_schools))
        .route(
            "/api/schools/{id}",
            get(school::get_school)
                .put(school::update_school)
                .delete(school::delete_school),
        )
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
}

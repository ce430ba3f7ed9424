use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::gateway::SchoolGateway;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` or
/// `State<SchoolGateway>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub gateway: SchoolGateway,
}

impl AppState {
    pub fn new(gateway: SchoolGateway) -> Self {
        Self {
            pool: gateway.pool().clone(),
            gateway,
        }
    }
}

/// Create a connection pool. Uses `connect_lazy` so no connections open
/// until the first query, which keeps the pool independent of the runtime
/// it was built on.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
}

/// Apply pending migrations from `migrations/`.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

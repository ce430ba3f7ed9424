use shared_types::{AppError, AuthUser, UserRole};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Database row for a dashboard user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
}

impl From<UserRow> for AuthUser {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            display_name: r.display_name,
            role: UserRole::from_str_or_default(&r.role),
        }
    }
}

const SELECT_USER: &str = "SELECT id, email, password_hash, display_name, role FROM users";

/// Find a user by email (case-insensitive).
pub async fn find_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<UserRow>, AppError> {
    sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE LOWER(email) = LOWER($1)"))
        .bind(email.trim())
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Find a user by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<UserRow>, AppError> {
    sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a user, or refresh the hash, name and role of an existing email.
pub async fn upsert(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
    display_name: &str,
    role: UserRole,
) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, password_hash, display_name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                display_name = EXCLUDED.display_name,
                role = EXCLUDED.role
        RETURNING id, email, password_hash, display_name, role
        "#,
    )
    .bind(email.trim())
    .bind(password_hash)
    .bind(display_name)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

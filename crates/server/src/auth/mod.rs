pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::{AppError, AuthResponse, AuthUser, LoginRequest, UserRole};
use sqlx::{Pool, Postgres};

use crate::error_convert::ValidateRequest;
use crate::repo::user as user_repo;

/// The authenticated principal a write is performed on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub role: UserRole,
}

impl From<&jwt::Claims> for Caller {
    fn from(claims: &jwt::Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.user_role(),
        }
    }
}

/// Check credentials and issue an access token.
///
/// Unknown email and wrong password produce the same error.
#[tracing::instrument(skip(pool, req), fields(email = %req.email))]
pub async fn authenticate(pool: &Pool<Postgres>, req: &LoginRequest) -> Result<AuthResponse, AppError> {
    req.validate_request()?;

    let invalid = || AppError::unauthorized("Invalid email or password");

    let user = user_repo::find_by_email(pool, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let user = AuthUser::from(user);
    let access_token = jwt::create_access_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    tracing::info!(user_id = user.id, "User signed in");
    Ok(AuthResponse { user, access_token })
}

/// Resolve the user behind validated claims. `None` if the account is gone.
pub async fn current_user(
    pool: &Pool<Postgres>,
    claims: &jwt::Claims,
) -> Result<Option<AuthUser>, AppError> {
    Ok(user_repo::find_by_id(pool, claims.sub).await?.map(AuthUser::from))
}

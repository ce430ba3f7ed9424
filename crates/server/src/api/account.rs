use dioxus::prelude::*;
use shared_types::AuthUser;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::{current_claims, gateway};

/// Sign in with email and password. Sets the HTTP-only session cookie on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{authenticate, cookies};
    use shared_types::LoginRequest;

    let gateway = gateway()?;
    let response = authenticate(gateway.pool(), &LoginRequest { email, password })
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_access_cookie(&response.access_token);
    Ok(response.user)
}

/// Sign out by clearing the session cookie.
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    crate::auth::cookies::schedule_clear_cookie();
    Ok(())
}

/// The signed-in user, or `None` when there is no valid session.
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    let Some(claims) = current_claims() else {
        return Ok(None);
    };

    let gateway = gateway()?;
    let user = crate::auth::current_user(gateway.pool(), &claims)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    if user.is_none() {
        // Token outlived its account.
        crate::auth::cookies::schedule_clear_cookie();
        tracing::warn!(user_id = claims.sub, "Session references a missing user");
    }
    Ok(user)
}

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::validate_access_token;

/// Permissive auth middleware.
///
/// Validates the access token from the cookie (or Bearer header) and
/// inserts the `Claims` into request extensions. Also inserts a
/// `CookieSlot` so server functions can set or clear the session cookie,
/// and applies that action to the response.
///
/// Does NOT reject unauthenticated requests; reads are public and the
/// gateway decides whether a write is allowed.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_access_token(req.headers()) {
        match validate_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid access token");
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match cookie_slot.take() {
        Some(PendingCookieAction::Set { access_token }) => {
            cookies::set_access_cookie(response.headers_mut(), &access_token);
        }
        Some(PendingCookieAction::Clear) => {
            cookies::clear_access_cookie(response.headers_mut());
        }
        None => {}
    }

    response
}

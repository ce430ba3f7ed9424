// Server-only helpers shared by the api/* server functions.

use dioxus::prelude::*;
use shared_types::AppError;

use crate::auth::{cookies, jwt, Caller};
use crate::error_convert::AppErrorExt;
use crate::gateway::SchoolGateway;

/// The gateway installed on the router as a request extension.
pub(crate) fn gateway() -> Result<SchoolGateway, ServerFnError> {
    dioxus::fullstack::FullstackContext::current()
        .and_then(|ctx| ctx.parts_mut().extensions.get::<SchoolGateway>().cloned())
        .ok_or_else(|| AppError::internal("School gateway is not configured").into_server_fn_error())
}

/// Validated claims for the current request, if any.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

/// The caller behind the current request, or `None` when signed out.
pub(crate) fn current_caller() -> Option<Caller> {
    current_claims().as_ref().map(Caller::from)
}

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use super::jwt;

pub const ACCESS_COOKIE: &str = "schools_access";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

/// Build a Set-Cookie header value for the access token.
/// A zero max-age produces a clearing cookie.
pub fn build_access_cookie(token: &str, max_age_minutes: i64) -> Option<HeaderValue> {
    let cookie = Cookie::build((ACCESS_COOKIE, token))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_minutes * 60))
        .secure(cookie_secure())
        .build();

    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Set the access cookie on a response using the configured expiry.
pub fn set_access_cookie(headers: &mut HeaderMap, access_token: &str) {
    if let Some(value) = build_access_cookie(access_token, jwt::access_token_expiry_minutes()) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Clear the access cookie on a response.
pub fn clear_access_cookie(headers: &mut HeaderMap) {
    if let Some(value) = build_access_cookie("", 0) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set { access_token: String },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn schedule(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.schedule(action);
        }
    }
}

/// Schedule the access cookie to be set by the middleware.
pub fn schedule_access_cookie(access_token: &str) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
    });
}

/// Schedule the access cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_takes_priority_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; schools_access=cookie-token"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(extract_access_token(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn bearer_header_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(extract_access_token(&headers).as_deref(), Some("header-token"));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        let value = build_access_cookie("", 0).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.contains("schools_access="));
        assert!(text.contains("Max-Age=0"));
        assert!(text.contains("HttpOnly"));
    }

    #[test]
    fn slot_hands_over_the_last_action() {
        let slot = CookieSlot::default();
        slot.schedule(PendingCookieAction::Set {
            access_token: "t".into(),
        });
        slot.schedule(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}

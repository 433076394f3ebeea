//! Request gates in front of the mutating joke routes.
//!
//! `require_session` answers "is this caller signed in" and records the
//! caller for later extractors. `require_antiforgery` then checks that a
//! submission carries a token issued to that same caller. Both reject before
//! any handler, and therefore any storage access, runs.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use service::auth::Claims;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";
pub const ANTIFORGERY_HEADER: &str = "requestverificationtoken";
pub const ANTIFORGERY_HEADER_ALT: &str = "x-csrf-token";

/// Signed-in caller, inserted into request extensions by `require_session`.
#[derive(Debug, Clone)]
pub struct Caller(pub Claims);

/// `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return h.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

fn antiforgery_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ANTIFORGERY_HEADER)
        .or_else(|| headers.get(ANTIFORGERY_HEADER_ALT))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = session_token(req.headers()) else {
        warn!(%path, "missing bearer token and auth_token cookie");
        return Err(JsonApiError::unauthorized("sign in required"));
    };
    match state.auth.tokens().verify_session(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(Caller(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(%path, err = %e, "session token rejected");
            Err(JsonApiError::unauthorized(e.to_string()))
        }
    }
}

/// Safe methods pass through; every other method needs a token bound to the caller.
pub async fn require_antiforgery(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let Some(caller) = req.extensions().get::<Caller>().cloned() else {
        return Err(JsonApiError::unauthorized("sign in required"));
    };
    let Some(token) = antiforgery_token(req.headers()) else {
        warn!(%path, sub = %caller.0.sub, "missing anti-forgery token");
        return Err(JsonApiError::forgery("missing anti-forgery token"));
    };
    if let Err(e) = state.auth.tokens().verify_antiforgery(&token, &caller.0) {
        warn!(%path, sub = %caller.0.sub, err = %e, "anti-forgery token rejected");
        return Err(JsonApiError::forgery(e.to_string()));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        h.insert(header::COOKIE, HeaderValue::from_static("auth_token=xyz"));
        assert_eq!(session_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=xyz"));
        assert_eq!(session_token(&h).as_deref(), Some("xyz"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(session_token(&h), None);
    }

    #[test]
    fn antiforgery_header_alias_is_accepted() {
        let mut h = HeaderMap::new();
        h.insert("x-csrf-token", HeaderValue::from_static(" tok "));
        assert_eq!(antiforgery_token(&h).as_deref(), Some("tok"));
        assert_eq!(antiforgery_token(&HeaderMap::new()), None);
    }
}

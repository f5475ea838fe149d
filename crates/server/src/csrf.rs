//! Anti-forgery tokens (double-submit cookie).
//!
//! Form pages hand out a token in the `csrf_token` cookie and in the body;
//! every unsafe request must echo it back in `X-CSRF-Token`.

use axum::{extract::Request, http::Method, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;
use uuid::Uuid;

use crate::errors::ApiError;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Existing token when the client already has one, otherwise a fresh one.
pub fn issue(jar: CookieJar) -> (CookieJar, String) {
    if let Some(existing) = jar.get(CSRF_COOKIE).map(|c| c.value().to_string()).filter(|v| !v.is_empty()) {
        return (jar, existing);
    }
    let token = Uuid::new_v4().simple().to_string();
    let mut cookie = Cookie::new(CSRF_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    (jar.add(cookie), token)
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Rejects unsafe requests whose header does not match the cookie.
pub async fn require_csrf(jar: CookieJar, req: Request, next: Next) -> Result<Response, ApiError> {
    if is_safe(req.method()) {
        return Ok(next.run(req).await);
    }
    let header = req.headers().get(CSRF_HEADER).and_then(|v| v.to_str().ok());
    let cookie = jar.get(CSRF_COOKIE).map(|c| c.value());
    match (header, cookie) {
        (Some(h), Some(c)) if !c.is_empty() && h == c => Ok(next.run(req).await),
        _ => {
            warn!(path = %req.uri().path(), "csrf token missing or mismatched");
            Err(ApiError::Forbidden("invalid anti-forgery token".into()))
        }
    }
}

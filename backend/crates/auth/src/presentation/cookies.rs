//! Cookie Rendering
//!
//! Reads the Cookie Pair from request headers and turns [`CookieWrites`]
//! into `Set-Cookie` headers.

use axum::http::{HeaderMap, header};
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::domain::entity::{CookieKind, CookiePair, CookieWrite, CookieWrites};
use crate::error::{AuthError, AuthResult};

pub fn read_cookie_pair(headers: &HeaderMap, config: &AuthConfig) -> CookiePair {
    CookiePair::new(
        extract_cookie(headers, config.cookie_name(CookieKind::Session)),
        extract_cookie(headers, config.cookie_name(CookieKind::Token)),
    )
}

/// One `Set-Cookie` header per write, in order
pub fn render_writes(config: &AuthConfig, writes: &CookieWrites) -> AuthResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for write in writes.iter() {
        let value = match write {
            CookieWrite::Set(kind, value) => config.cookie(*kind).set_cookie_header(value),
            CookieWrite::Clear(kind) => config.cookie(*kind).delete_cookie_header(),
        }
        .map_err(|e| AuthError::Internal(format!("unrenderable cookie: {e}")))?;
        headers.append(header::SET_COOKIE, value);
    }
    Ok(headers)
}

/// Re-emit the session cookie the browser sent, with its full lifetime
///
/// The token cookie is never re-asserted: only a fresh mint may extend it.
pub fn render_reassert(config: &AuthConfig, cookies: &CookiePair) -> AuthResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(value) = cookies.get(CookieKind::Session) {
        let value = config
            .cookie(CookieKind::Session)
            .set_cookie_header(value)
            .map_err(|e| AuthError::Internal(format!("unrenderable cookie: {e}")))?;
        headers.append(header::SET_COOKIE, value);
    }
    Ok(headers)
}

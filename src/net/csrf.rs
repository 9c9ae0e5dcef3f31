//! Outbound CSRF stage.
//!
//! DESIGN
//! ======
//! Every request built by `ApiClient` passes through `CsrfStage::apply`
//! right before it is sent. For state-changing methods the stage resolves
//! a token (session state first, then the readable `csrf_token` cookie) and
//! sets `X-CSRF-Token`. Resolution runs per request and reads only local
//! state, so a token rotated mid-session is used on the very next call.

#[cfg(test)]
#[path = "csrf_test.rs"]
mod csrf_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderName, HeaderValue};

use super::cookies::csrf_from_cookie_header;

/// Header carrying the CSRF token on mutating requests (`X-CSRF-Token`).
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Supplies the CSRF token currently held in session state.
pub trait TokenSource: Send + Sync {
    fn session_token(&self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn session_token(&self) -> Option<String> {
        self()
    }
}

/// Whether requests with this method must carry the CSRF header.
#[must_use]
pub fn requires_csrf(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Pick the token to send: the session value, else the cookie value.
#[must_use]
pub fn resolve_token(session_token: Option<String>, cookie_header: Option<&str>) -> Option<String> {
    session_token
        .filter(|token| !token.is_empty())
        .or_else(|| cookie_header.and_then(csrf_from_cookie_header))
}

/// Request filter that attaches the CSRF header.
pub struct CsrfStage {
    source: Arc<dyn TokenSource>,
    jar: Arc<Jar>,
}

impl CsrfStage {
    pub fn new(source: Arc<dyn TokenSource>, jar: Arc<Jar>) -> Self {
        Self { source, jar }
    }

    /// Attach `X-CSRF-Token` to `request` when its method requires it and a
    /// token resolves. Otherwise the request is left untouched.
    pub fn apply(&self, request: &mut reqwest::Request) {
        if !requires_csrf(request.method()) {
            return;
        }

        let cookies = self.jar.cookies(request.url());
        let cookie_header = cookies.as_ref().and_then(|value| value.to_str().ok());

        let Some(token) = resolve_token(self.source.session_token(), cookie_header) else {
            tracing::debug!(method = %request.method(), url = %request.url(), "no csrf token available");
            return;
        };

        match HeaderValue::from_str(&token) {
            Ok(value) => {
                request.headers_mut().insert(HeaderName::from_static(CSRF_HEADER_NAME), value);
            }
            Err(_) => {
                tracing::warn!(method = %request.method(), "csrf token is not a valid header value; sending without it");
            }
        }
    }
}

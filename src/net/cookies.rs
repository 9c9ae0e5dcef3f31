//! Readable-cookie access for the CSRF fallback path.
//!
//! The server mirrors the session's CSRF token into a script-readable
//! `csrf_token` cookie. It is a best-effort source only: the token returned
//! by `/auth/login` is authoritative.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::borrow::Cow;

pub const CSRF_COOKIE_NAME: &str = "csrf_token";

/// Extract the `csrf_token` value from a `Cookie`-style header string
/// (`name=value; name2=value2`).
///
/// The whole string is URL-decoded first, then split on `;`; the first
/// trimmed entry starting with `csrf_token=` wins. Empty values count as
/// absent.
#[must_use]
pub fn csrf_from_cookie_header(header: &str) -> Option<String> {
    let decoded = urlencoding::decode(header).unwrap_or(Cow::Borrowed(header));
    let prefix = format!("{CSRF_COOKIE_NAME}=");

    decoded
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

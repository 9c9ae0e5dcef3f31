//! Error types for configuration and backend calls.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` mirrors how the dashboard reacts to failures: network failures,
//! rejected credentials, and server-side validation errors carrying a
//! `detail` message. Session-affecting calls (`resolve_session`, `logout`)
//! settle into a state instead of returning these; every other call hands
//! them to the caller for display.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, reset).
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials or session were rejected (HTTP 401/403).
    #[error("authentication rejected (HTTP {status}){}", detail_suffix(.detail))]
    AuthRejected { status: u16, detail: Option<String> },

    /// Any other non-success status, usually a validation or constraint error.
    #[error("server returned HTTP {status}{}", detail_suffix(.detail))]
    Server { status: u16, detail: Option<String> },

    /// A success response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A required input field was empty; nothing was sent.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A new password was shorter than the backend accepts; nothing was sent.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl ApiError {
    /// Build an error from a non-success status and its raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 | 403 => Self::AuthRejected { status, detail },
            _ => Self::Server { status, detail },
        }
    }

    /// Stable machine-readable code for notifications and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::AuthRejected { .. } => "E_AUTH_REJECTED",
            Self::Server { .. } => "E_SERVER",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidUrl(_) => "E_INVALID_URL",
            Self::MissingField(_) => "E_MISSING_FIELD",
            Self::PasswordTooShort { .. } => "E_PASSWORD_TOO_SHORT",
        }
    }

    /// Whether a caller could reasonably try the same call again.
    ///
    /// Nothing in this crate retries automatically.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { status: 429 | 500..=599, .. })
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRejected { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided `detail` message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::AuthRejected { detail, .. } | Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to show a user: the server detail when present, else `fallback`.
    ///
    /// Local validation failures always report themselves, since no request was made.
    #[must_use]
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            Self::MissingField(_) | Self::PasswordTooShort { .. } => self.to_string(),
            _ => self.detail().unwrap_or(fallback).to_owned(),
        }
    }
}

/// Pull a display message out of an error body.
///
/// Accepts `{"detail": "text"}` and the list form
/// `{"detail": [{"msg": "..."}, ...]}` emitted for field validation failures.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

/// Errors produced while building a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The backend URL is not an absolute `http`/`https` URL.
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without the `/api` suffix and without a trailing slash.
    pub backend_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Config for an explicit backend origin with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `backend_url` is not an absolute `http`/`https` URL.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { backend_url: normalize_backend_url(backend_url)?, timeouts: Timeouts::default() })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GOLDSHOP_BACKEND_URL`: default `http://127.0.0.1:8001`
    /// - `GOLDSHOP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GOLDSHOP_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// Timeouts that are unparseable or zero fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_backend_url(None)
    }

    /// Like `from_env`, but an explicit `backend_url` wins and
    /// `GOLDSHOP_BACKEND_URL` is not read at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen backend URL is malformed.
    pub fn from_env_with_backend_url(backend_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_vars(backend_url, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(
        backend_url: Option<&str>,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let backend_url = match backend_url {
            Some(url) => url.to_owned(),
            None => get("GOLDSHOP_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned()),
        };
        let timeouts = Timeouts {
            request_secs: parse_secs(get("GOLDSHOP_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_secs(get("GOLDSHOP_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { backend_url: normalize_backend_url(&backend_url)?, timeouts })
    }

    /// Replace the backend origin, keeping timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `backend_url` is malformed.
    pub fn with_backend_url(mut self, backend_url: &str) -> Result<Self, ConfigError> {
        self.backend_url = normalize_backend_url(backend_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// REST base every endpoint path is appended to.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url)
    }
}

/// Positive whole seconds; zero would make every request time out at once.
fn parse_secs(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBackendUrl { url: raw.to_owned(), reason };

    let url = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_owned()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

//! HTTP transport shared by the session controller and every resource call.
//!
//! ARCHITECTURE
//! ============
//! One `reqwest::Client` with a shared cookie jar plays the role of the
//! browser: the server's HTTP-only session cookie and the readable
//! `csrf_token` cookie land in the jar and are sent back automatically.
//! Requests are built first, passed through the CSRF stage, then executed,
//! so header attachment is an explicit step rather than hidden client state.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are mapped to `ApiError` with the server's `detail`
//! message. Nothing is retried.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::csrf::{CsrfStage, TokenSource};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    api_base: String,
    csrf: Arc<CsrfStage>,
}

impl ApiClient {
    /// Build a client for `config`, reading session CSRF tokens from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, source: Arc<dyn TokenSource>) -> Result<Self, ConfigError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;

        let csrf = Arc::new(CsrfStage::new(source, Arc::clone(&jar)));
        Ok(Self { http, jar, api_base: config.api_base(), csrf })
    }

    /// REST base, e.g. `http://127.0.0.1:8001/api`.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL for an endpoint path such as `/auth/me`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Cookies the jar would send to the API base, as a `Cookie` header string.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.api_base).ok()?;
        let value = self.jar.cookies(&url)?;
        value.to_str().ok().map(str::to_owned)
    }

    /// Store a `Set-Cookie`-style string for the API origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base is not a valid URL.
    pub fn add_cookie(&self, cookie: &str) -> Result<(), ApiError> {
        let url = reqwest::Url::parse(&self.api_base).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        self.jar.add_cookie_str(cookie, &url);
        Ok(())
    }

    // =========================================================================
    // TYPED CALLS
    // =========================================================================

    /// `GET path` decoded as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.dispatch(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// `GET path?query` decoded as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.dispatch(self.request(Method::GET, path).query(query)).await?;
        decode(response).await
    }

    /// Raw response bytes, for binary (spreadsheet export) endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(self.request(Method::GET, path).query(query)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send a JSON body and decode the response as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.dispatch(self.request(method, path).json(body)).await?;
        decode(response).await
    }

    /// Send a JSON body and ignore the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn send_unit<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch(self.request(method, path).json(body)).await?;
        Ok(())
    }

    /// Send a request without a body and ignore the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.request(method, path)).await?;
        Ok(())
    }

    /// Untyped call: optional JSON body, JSON response (`null` when empty).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a non-JSON body.
    pub async fn send_value(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.dispatch(builder).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Build, run the CSRF stage, execute, and map non-2xx statuses.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let mut request = builder.build().map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        self.csrf.apply(&mut request);

        let method = request.method().clone();
        let path = request.url().path().to_owned();
        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "api request");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

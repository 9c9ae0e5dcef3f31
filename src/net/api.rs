//! Auth endpoint calls.
//!
//! These are plain request/response wrappers; deciding what a failure means
//! for session state is the controller's job.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Method;

use super::http::ApiClient;
use super::types::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::error::ApiError;

pub const ME_PATH: &str = "/auth/me";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const REGISTER_PATH: &str = "/auth/register";

/// Fetch the user bound to the current session cookie (`GET /auth/me`).
///
/// # Errors
///
/// Returns an error if there is no valid session or the request fails.
pub async fn fetch_current_user(api: &ApiClient) -> Result<User, ApiError> {
    api.get_json(ME_PATH).await
}

/// Authenticate with username and password (`POST /auth/login`).
///
/// # Errors
///
/// Returns `ApiError::AuthRejected` for bad credentials, or any transport error.
pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    api.send_json(Method::POST, LOGIN_PATH, &LoginRequest { username, password })
        .await
}

/// End the server-side session (`POST /auth/logout`).
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.send_empty(Method::POST, LOGOUT_PATH).await
}

/// Create a new account (`POST /auth/register`).
///
/// # Errors
///
/// Returns an error if the server rejects the profile or the request fails.
pub async fn register(api: &ApiClient, profile: &RegisterRequest) -> Result<(), ApiError> {
    if profile.username.trim().is_empty() {
        return Err(ApiError::MissingField("username"));
    }
    if profile.password.is_empty() {
        return Err(ApiError::MissingField("password"));
    }
    api.send_unit(Method::POST, REGISTER_PATH, profile).await
}

//! Staff accounts managed from the settings screen.
//!
//! Accounts are created through `POST /auth/register` like self-service
//! sign-up, but the management form also insists on an email and full
//! name. Updates never carry a password; that goes through
//! `change_password` on its own endpoint.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use reqwest::Method;
use serde::Serialize;

use super::require_field;
use crate::error::ApiError;
use crate::net::api::register;
use crate::net::http::ApiClient;
use crate::net::types::{Page, RegisterRequest, User};

const USERS_PATH: &str = "/users";

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Profile edit payload for `PATCH /users/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        require_field("username", &self.username)?;
        require_field("email", &self.email)?;
        require_field("full_name", &self.full_name)
    }
}

#[derive(Debug, Serialize)]
struct PasswordChange<'a> {
    new_password: &'a str,
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    let page: Page<User> = api.get_json(USERS_PATH).await?;
    Ok(page.items)
}

/// Create an account with a full profile.
///
/// # Errors
///
/// Returns `ApiError::MissingField` for a blank username, email, full name,
/// or password, or the backend error.
pub async fn create_user(api: &ApiClient, profile: &RegisterRequest) -> Result<(), ApiError> {
    require_field("username", &profile.username)?;
    require_field("email", profile.email.as_deref().unwrap_or_default())?;
    require_field("full_name", profile.full_name.as_deref().unwrap_or_default())?;
    register(api, profile).await
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank username, email, or full
/// name, or the backend error.
pub async fn update_user(api: &ApiClient, id: &str, update: &UserUpdate) -> Result<(), ApiError> {
    update.validate()?;
    api.send_unit(Method::PATCH, &format!("{USERS_PATH}/{id}"), update).await
}

/// # Errors
///
/// Returns the backend error.
pub async fn delete_user(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.send_empty(Method::DELETE, &format!("{USERS_PATH}/{id}")).await
}

/// Set a new password for `id`. Length counts characters, not bytes.
///
/// # Errors
///
/// Returns `ApiError::PasswordTooShort` below `MIN_PASSWORD_LEN`, or the
/// backend error.
pub async fn change_password(api: &ApiClient, id: &str, new_password: &str) -> Result<(), ApiError> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    let body = PasswordChange { new_password };
    api.send_unit(Method::POST, &format!("{USERS_PATH}/{id}/change-password"), &body).await
}

/// Admins and managers may add, edit, and reset passwords.
#[must_use]
pub fn can_manage_users(actor: &User) -> bool {
    matches!(actor.role.as_str(), "admin" | "manager")
}

/// Only admins delete accounts, and never their own.
#[must_use]
pub fn can_delete_user(actor: &User, target: &User) -> bool {
    actor.is_admin() && actor.id != target.id
}

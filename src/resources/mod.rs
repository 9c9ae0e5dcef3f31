//! Typed passthrough for the dashboard's CRUD endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call goes through the session's `ApiClient`, so cookies and the
//! CSRF header are handled in one place. Nothing here keeps state or
//! interprets failures; errors go straight back to the caller.
//!
//! DESIGN
//! ======
//! One submodule per backend collection. Collections without a dedicated
//! type (accounts, ledgers) are reached through `list_json` and
//! `send_value` as raw JSON.


pub mod dashboard;
pub mod inventory;
pub mod parties;
pub mod reports;
pub mod settings;
pub mod users;
pub mod work_types;
pub mod workers;

use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::Page;

/// Reject a blank `name` before anything is sent.
///
/// # Errors
///
/// Returns `ApiError::MissingField("name")` for an empty or whitespace-only name.
pub fn require_name(name: &str) -> Result<(), ApiError> {
    require_field("name", name)
}

/// Reject an empty or whitespace-only `value` for `field`.
pub(crate) fn require_field(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::MissingField(field));
    }
    Ok(())
}

/// Active/inactive filter shared by the worker and work-type lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    #[must_use]
    pub fn admits(self, active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => active,
            Self::Inactive => !active,
        }
    }
}

/// Case-insensitive substring match on an optional field.
/// `needle` must already be lowercase.
pub(crate) fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Any collection endpoint as raw JSON items.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or a body that is
/// neither an array nor an `items` envelope.
pub async fn list_json(api: &ApiClient, path: &str) -> Result<Page<Value>, ApiError> {
    api.get_json(path).await
}

/// Untyped call against any endpoint. Returns `null` for an empty body.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or a non-JSON body.
pub async fn send_value(api: &ApiClient, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
    api.send_value(method, path, body).await
}

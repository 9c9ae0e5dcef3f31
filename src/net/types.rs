//! Shared wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's snake_case JSON. Optional fields the
//! dashboard treats as "missing means empty" (`permissions`, list envelopes)
//! decode leniently instead of failing the whole response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::{self, DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role value that is granted every permission.
pub const ADMIN_ROLE: &str = "admin";

// =============================================================================
// AUTH
// =============================================================================

/// Authenticated user as returned by `/auth/me` and `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Role name (`admin`, `manager`, `staff`, ...).
    pub role: String,
    /// Granted permission names. `null` or absent decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Numeric field where `null` or absence means zero.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    /// Authoritative CSRF token for the new session.
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// New-account payload for `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination block of a paginated collection envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Single page describing a bare (unpaginated) list of `len` items.
    #[must_use]
    pub fn single(len: usize) -> Self {
        let len32 = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            total_count: len as u64,
            page: 1,
            page_size: len32,
            total_pages: 1,
            has_next: false,
            has_prev: false,
        }
    }
}

/// A collection response.
///
/// Collection endpoints return either a bare JSON array or
/// `{ "items": [...], "pagination": {...} }`; both decode into `Page`. An
/// object carrying neither key is rejected, so an unexpected body surfaces
/// as a decode error instead of an empty list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            list @ Value::Array(_) => {
                let items: Vec<T> = decode_part(list)?;
                let pagination = Pagination::single(items.len());
                Ok(Self { items, pagination })
            }
            Value::Object(mut envelope) => {
                let raw_items = envelope.remove("items");
                let raw_pagination = envelope.remove("pagination");
                if raw_items.is_none() && raw_pagination.is_none() {
                    return Err(D::Error::custom("expected a list or an object with `items` or `pagination`"));
                }
                let items: Vec<T> = match raw_items {
                    None | Some(Value::Null) => Vec::new(),
                    Some(raw) => decode_part(raw)?,
                };
                let pagination = match raw_pagination {
                    None | Some(Value::Null) => Pagination::single(items.len()),
                    Some(raw) => decode_part(raw)?,
                };
                Ok(Self { items, pagination })
            }
            _ => Err(D::Error::custom("expected a list or a paginated envelope")),
        }
    }
}

/// Decode one part of an envelope, keeping serde's message for the caller.
fn decode_part<T: DeserializeOwned, E: de::Error>(raw: Value) -> Result<T, E> {
    serde_json::from_value(raw).map_err(E::custom)
}

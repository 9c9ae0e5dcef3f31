//! Work types (repair, polish, resize, ...) offered on job cards.

#[cfg(test)]
#[path = "work_types_test.rs"]
mod work_types_test;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ActiveFilter, field_matches, require_name};
use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::Page;

const WORK_TYPES_PATH: &str = "/work-types";

fn active_by_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

/// Create/update payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkTypeInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Default for WorkTypeInput {
    fn default() -> Self {
        Self { name: String::new(), description: None, is_active: true }
    }
}

/// One page of work types.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn list_work_types(api: &ApiClient, page: u32, page_size: u32) -> Result<Page<WorkType>, ApiError> {
    let query = [("page", page.to_string()), ("page_size", page_size.to_string())];
    api.get_json_with_query(WORK_TYPES_PATH, &query).await
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn create_work_type(api: &ApiClient, input: &WorkTypeInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::POST, WORK_TYPES_PATH, input).await
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn update_work_type(api: &ApiClient, id: &str, input: &WorkTypeInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::PATCH, &format!("{WORK_TYPES_PATH}/{id}"), input).await
}

/// # Errors
///
/// Returns the backend error.
pub async fn delete_work_type(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.send_empty(Method::DELETE, &format!("{WORK_TYPES_PATH}/{id}")).await
}

/// Work types passing the active filter whose name or description contains
/// `search`, ignoring case. An empty search matches everything.
#[must_use]
pub fn filter_work_types<'a>(work_types: &'a [WorkType], search: &str, filter: ActiveFilter) -> Vec<&'a WorkType> {
    let needle = search.to_lowercase();
    work_types
        .iter()
        .filter(|w| filter.admits(w.is_active))
        .filter(|w| {
            needle.is_empty() || field_matches(Some(&w.name), &needle) || field_matches(w.description.as_deref(), &needle)
        })
        .collect()
}

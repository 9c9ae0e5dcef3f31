//! Workshop workers assigned to job cards.

#[cfg(test)]
#[path = "workers_test.rs"]
mod workers_test;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ActiveFilter, field_matches, require_name};
use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::Page;

const WORKERS_PATH: &str = "/workers";

fn active_by_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

/// Create/update payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkerInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub active: bool,
}

impl Default for WorkerInput {
    fn default() -> Self {
        Self { name: String::new(), phone: None, role: None, active: true }
    }
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn list_workers(api: &ApiClient) -> Result<Vec<Worker>, ApiError> {
    let page: Page<Worker> = api.get_json(WORKERS_PATH).await?;
    Ok(page.items)
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn create_worker(api: &ApiClient, input: &WorkerInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::POST, WORKERS_PATH, input).await
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn update_worker(api: &ApiClient, id: &str, input: &WorkerInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::PATCH, &format!("{WORKERS_PATH}/{id}"), input).await
}

/// # Errors
///
/// Returns the backend error.
pub async fn delete_worker(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.send_empty(Method::DELETE, &format!("{WORKERS_PATH}/{id}")).await
}

/// Workers passing the status filter whose name, phone, or role contains
/// `search`, ignoring case.
#[must_use]
pub fn filter_workers<'a>(workers: &'a [Worker], search: &str, filter: ActiveFilter) -> Vec<&'a Worker> {
    let needle = search.to_lowercase();
    workers
        .iter()
        .filter(|w| filter.admits(w.active))
        .filter(|w| {
            needle.is_empty()
                || field_matches(Some(&w.name), &needle)
                || field_matches(w.phone.as_deref(), &needle)
                || field_matches(w.role.as_deref(), &needle)
        })
        .collect()
}

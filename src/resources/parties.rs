//! Parties: customers, vendors, and workers the shop trades with.

#[cfg(test)]
#[path = "parties_test.rs"]
mod parties_test;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::require_name;
use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::{Page, null_as_zero};

const PARTIES_PATH: &str = "/parties";
const OUTSTANDING_PATH: &str = "/parties/outstanding-summary";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    #[default]
    Customer,
    Vendor,
    Worker,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub party_type: PartyType,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create/update payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PartyInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub party_type: PartyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Totals from `GET /parties/outstanding-summary`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutstandingSummary {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_customer_due: f64,
    #[serde(default)]
    pub total_vendor_payable: Option<f64>,
}

/// Type selector for `filter_parties`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartyFilter {
    #[default]
    All,
    Only(PartyType),
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn list_parties(api: &ApiClient) -> Result<Vec<Party>, ApiError> {
    let page: Page<Party> = api.get_json(PARTIES_PATH).await?;
    Ok(page.items)
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn create_party(api: &ApiClient, input: &PartyInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::POST, PARTIES_PATH, input).await
}

/// # Errors
///
/// Returns `ApiError::MissingField` for a blank name, or the backend error.
pub async fn update_party(api: &ApiClient, id: &str, input: &PartyInput) -> Result<(), ApiError> {
    require_name(&input.name)?;
    api.send_unit(Method::PATCH, &format!("{PARTIES_PATH}/{id}"), input).await
}

/// # Errors
///
/// Returns the backend error.
pub async fn delete_party(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.send_empty(Method::DELETE, &format!("{PARTIES_PATH}/{id}")).await
}

/// Ledger for one party, passed through as JSON.
///
/// # Errors
///
/// Returns the backend error.
pub async fn party_ledger(api: &ApiClient, id: &str) -> Result<Value, ApiError> {
    api.get_json(&format!("{PARTIES_PATH}/{id}/ledger")).await
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn outstanding_summary(api: &ApiClient) -> Result<OutstandingSummary, ApiError> {
    api.get_json(OUTSTANDING_PATH).await
}

/// Parties whose name contains `search` (any case) or whose phone contains
/// it verbatim, restricted to the selected type.
#[must_use]
pub fn filter_parties<'a>(parties: &'a [Party], search: &str, filter: PartyFilter) -> Vec<&'a Party> {
    let needle = search.to_lowercase();
    parties
        .iter()
        .filter(|party| match filter {
            PartyFilter::All => true,
            PartyFilter::Only(kind) => party.party_type == kind,
        })
        .filter(|party| {
            party.name.to_lowercase().contains(&needle) || party.phone.as_deref().is_some_and(|p| p.contains(search))
        })
        .collect()
}

//! Inventory headers (stock categories) and per-header stock totals.

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::{Page, null_as_zero};

const HEADERS_PATH: &str = "/inventory/headers";
const STOCK_TOTALS_PATH: &str = "/inventory/stock-totals";

/// Quantity and weight on hand for one inventory header. Missing or `null`
/// numbers read as zero so one incomplete row does not spoil the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockTotal {
    #[serde(default)]
    pub header_id: Option<String>,
    pub header_name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_qty: f64,
    /// Grams.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_weight: f64,
}

fn page_query(page: u32, page_size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("page_size", page_size.to_string())]
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn stock_totals(api: &ApiClient, page: u32, page_size: u32) -> Result<Page<StockTotal>, ApiError> {
    api.get_json_with_query(STOCK_TOTALS_PATH, &page_query(page, page_size)).await
}

/// Inventory headers as raw JSON; callers mostly need the pagination count.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn inventory_headers(api: &ApiClient, page: u32, page_size: u32) -> Result<Page<Value>, ApiError> {
    api.get_json_with_query(HEADERS_PATH, &page_query(page, page_size)).await
}

//! Dashboard headline numbers.
//!
//! ERROR HANDLING
//! ==============
//! The dashboard never fails: if any part cannot be fetched the whole set
//! falls back to zeros and the failure is logged.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::Serialize;
use serde_json::Value;

use super::inventory::{self, StockTotal};
use super::parties::{self, OutstandingSummary};
use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::Page;

/// Headers with fewer pieces than this count as low stock.
pub const LOW_STOCK_QTY: f64 = 5.0;

/// Page size used to pull "everything" for the totals.
const ALL_ROWS: u32 = 1000;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_headers: u64,
    /// Grams.
    pub total_stock: f64,
    pub total_outstanding: f64,
    pub low_stock_items: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_parts(headers: &Page<Value>, stock: &[StockTotal], outstanding: &OutstandingSummary) -> Self {
        Self {
            total_headers: headers.pagination.total_count,
            total_stock: stock.iter().map(|s| s.total_weight).sum(),
            total_outstanding: outstanding.total_customer_due,
            low_stock_items: stock.iter().filter(|s| s.total_qty < LOW_STOCK_QTY).count(),
        }
    }
}

/// Fetch headers, all stock totals, and the outstanding summary together.
pub async fn load_dashboard(api: &ApiClient) -> DashboardStats {
    match fetch_parts(api).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(error = %e, code = e.error_code(), "failed to load dashboard");
            DashboardStats::default()
        }
    }
}

async fn fetch_parts(api: &ApiClient) -> Result<DashboardStats, ApiError> {
    let (headers, stock, outstanding) = tokio::try_join!(
        inventory::inventory_headers(api, 1, ALL_ROWS),
        inventory::stock_totals(api, 1, ALL_ROWS),
        parties::outstanding_summary(api),
    )?;
    Ok(DashboardStats::from_parts(&headers, &stock.items, &outstanding))
}

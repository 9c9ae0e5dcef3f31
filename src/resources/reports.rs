//! Report endpoints. Views and summaries come back as JSON; exports are
//! returned as the raw spreadsheet bytes.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use serde_json::Value;

use crate::error::ApiError;
use crate::net::http::ApiClient;

const FINANCIAL_SUMMARY_PATH: &str = "/reports/financial-summary";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Inventory,
    Parties,
    Invoices,
}

impl ExportKind {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Inventory => "/reports/inventory-export",
            Self::Parties => "/reports/parties-export",
            Self::Invoices => "/reports/invoices-export",
        }
    }
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn financial_summary(api: &ApiClient, query: &[(&str, String)]) -> Result<Value, ApiError> {
    api.get_json_with_query(FINANCIAL_SUMMARY_PATH, query).await
}

/// Download an export. The bytes are not inspected.
///
/// # Errors
///
/// Returns an error on transport failure or non-2xx status.
pub async fn export(api: &ApiClient, kind: ExportKind, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
    api.get_bytes(kind.path(), query).await
}

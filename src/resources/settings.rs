//! Shop-wide settings (`/settings/shop`).

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::net::http::ApiClient;

const SHOP_SETTINGS_PATH: &str = "/settings/shop";

/// Factor the backend assumes when none has been saved.
pub const DEFAULT_PURCHASE_CONVERSION_FACTOR: f64 = 0.92;

fn default_factor() -> f64 {
    DEFAULT_PURCHASE_CONVERSION_FACTOR
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(default = "default_factor")]
    pub purchase_conversion_factor: f64,
    /// Fields this client does not model are sent back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self { purchase_conversion_factor: DEFAULT_PURCHASE_CONVERSION_FACTOR, extra: Map::new() }
    }
}

/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or decode failure.
pub async fn shop_settings(api: &ApiClient) -> Result<ShopSettings, ApiError> {
    api.get_json(SHOP_SETTINGS_PATH).await
}

/// Replace the shop settings (`PUT`).
///
/// # Errors
///
/// Returns the backend error.
pub async fn update_shop_settings(api: &ApiClient, settings: &ShopSettings) -> Result<(), ApiError> {
    api.send_unit(Method::PUT, SHOP_SETTINGS_PATH, settings).await
}

//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup, so it is passed by reference
//! and never locked.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Database file. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Heading printed above the browse table
    pub store_name: String,

    /// Prefix for displayed prices
    pub currency_symbol: String,

    /// Paths the local API answers with a failure
    pub simulate_error: Vec<String>,

    /// Latency added to every catalog route, in milliseconds
    pub simulate_delay_ms: Option<u64>,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Database: platform data directory
    /// - Store: "Storefront"
    /// - Currency: "$"
    /// - No simulated faults
    fn default() -> Self {
        AppConfig {
            db_path: None,
            store_name: "Storefront".to_string(),
            currency_symbol: "$".to_string(),
            simulate_error: Vec::new(),
            simulate_delay_ms: None,
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DB_PATH`: Database file
    /// - `STOREFRONT_STORE_NAME`: Store name
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Currency symbol
    /// - `STOREFRONT_SIMULATE_ERROR`: Comma separated paths to fail, e.g. "/categories"
    /// - `STOREFRONT_SIMULATE_DELAY_MS`: Latency for every catalog route
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = var("STOREFRONT_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("STOREFRONT_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(symbol) = var("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(paths) = var("STOREFRONT_SIMULATE_ERROR") {
            config.simulate_error = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(ms) = var("STOREFRONT_SIMULATE_DELAY_MS") {
            config.simulate_delay_ms = ms.trim().parse().ok();
        }

        config
    }

    pub fn simulate_delay(&self) -> Option<Duration> {
        self.simulate_delay_ms.map(Duration::from_millis)
    }

    /// Formats a price for display.
    ///
    /// ## Example
    /// With symbol "$": `12.5` → `"$12.50"`
    pub fn format_price(&self, price: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, price)
    }
}

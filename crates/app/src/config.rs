//! Storefront configuration, read from the environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the low-stock threshold.
pub const LOW_STOCK_THRESHOLD_ENV: &str = "SMARTSUPPLY_LOW_STOCK_THRESHOLD";

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Items with quantity strictly below this are reported as low stock.
    pub low_stock_threshold: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StoreConfig {
    /// Load from process environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOW_STOCK_THRESHOLD_ENV) {
            config.low_stock_threshold =
                raw.trim()
                    .parse::<i64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: LOW_STOCK_THRESHOLD_ENV,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }
}

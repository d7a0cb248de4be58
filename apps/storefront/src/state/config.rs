//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`AUTOPARTS_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use autoparts_core::Money;

/// Default simulated latency of login and registration.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

/// File name of the storefront database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "autoparts.db";

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the application data directory")]
    NoDataDirectory,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Shown in the header of every page
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol, written after the amount
    pub currency_symbol: String,

    /// Decimal places shown for amounts (0 or 2)
    pub currency_decimals: u8,

    /// Simulated latency of login and registration
    pub login_delay_ms: u64,

    /// Explicit database file; `None` means the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Store: "AutoParts PRO"
    /// - Currency: RUB (₽), two decimals
    /// - Login delay: 500 ms
    fn default() -> Self {
        StorefrontConfig {
            store_name: "AutoParts PRO".to_string(),
            currency_code: "RUB".to_string(),
            currency_symbol: "₽".to_string(),
            currency_decimals: 2,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            database_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Builds the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `AUTOPARTS_STORE_NAME`: Override store name
    /// - `AUTOPARTS_LOGIN_DELAY_MS`: Override login latency in milliseconds
    /// - `AUTOPARTS_DB_PATH`: Use this database file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig::default();

        if let Some(store_name) = lookup("AUTOPARTS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(delay) = lookup("AUTOPARTS_LOGIN_DELAY_MS") {
            match delay.trim().parse::<u64>() {
                Ok(ms) => config.login_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid AUTOPARTS_LOGIN_DELAY_MS"),
            }
        }

        if let Some(path) = lookup("AUTOPARTS_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/ru.autoparts.storefront/autoparts.db`
    /// - **Windows**: `%APPDATA%\autoparts\storefront\data\autoparts.db`
    /// - **Linux**: `~/.local/share/storefront/autoparts.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("ru", "autoparts", "storefront")
            .ok_or(ConfigError::NoDataDirectory)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Formats an amount the way the storefront shows prices.
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::Money;
    /// use autoparts_storefront::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_kopecks(297_500)), "2975.00 ₽");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let kopecks = amount.kopecks().unsigned_abs();
        let rubles = kopecks / 100;
        let fraction = kopecks % 100;

        if self.currency_decimals == 0 {
            format!("{}{} {}", sign, rubles, self.currency_symbol)
        } else {
            format!("{}{}.{:02} {}", sign, rubles, fraction, self.currency_symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(|_| None);
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.store_name, "AutoParts PRO");
        assert_eq!(config.login_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_env_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("AUTOPARTS_STORE_NAME", "Запчасти"),
            ("AUTOPARTS_LOGIN_DELAY_MS", "0"),
            ("AUTOPARTS_DB_PATH", "/tmp/shop.db"),
        ]));

        assert_eq!(config.store_name, "Запчасти");
        assert_eq!(config.login_delay(), Duration::ZERO);
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/shop.db")
        );
    }

    #[test]
    fn test_invalid_delay_keeps_default() {
        let config =
            StorefrontConfig::from_lookup(lookup_from(&[("AUTOPARTS_LOGIN_DELAY_MS", "soon")]));
        assert_eq!(config.login_delay_ms, DEFAULT_LOGIN_DELAY_MS);
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_rubles(3425)), "3425.00 ₽");
        assert_eq!(config.format_currency(Money::from_kopecks(1)), "0.01 ₽");
        assert_eq!(config.format_currency(Money::from_kopecks(-52_500)), "-525.00 ₽");

        let whole = StorefrontConfig {
            currency_decimals: 0,
            ..StorefrontConfig::default()
        };
        assert_eq!(whole.format_currency(Money::from_rubles(20000)), "20000 ₽");
    }
}

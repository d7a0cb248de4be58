//! # Config Commands
//!
//! Configuration retrieval for the UI.

use tracing::debug;

use crate::state::StorefrontConfig;

/// Gets the storefront configuration.
///
/// ## When Used
/// - Page header (store name)
/// - Price formatting (currency symbol, decimals)
///
/// ## Returns
/// The configuration with the database location omitted.
pub fn get_config(config: &StorefrontConfig) -> StorefrontConfig {
    debug!("get_config command");
    StorefrontConfig {
        database_path: None,
        ..config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_database_path_is_not_exposed() {
        let config = StorefrontConfig {
            database_path: Some(PathBuf::from("/home/user/autoparts.db")),
            ..StorefrontConfig::default()
        };

        let exposed = get_config(&config);
        assert_eq!(exposed.database_path, None);
        assert_eq!(exposed.store_name, config.store_name);

        let json = serde_json::to_value(&exposed).unwrap();
        assert!(json.get("databasePath").is_none());
        assert_eq!(json["currencySymbol"], "₽");
    }
}

//! Config

use std::{fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pricing::PricingRules;

/// Errors loading the store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Display name used on invoices and confirmations.
    pub store_name: String,

    /// Prefix for generated order identifiers.
    pub order_prefix: String,

    /// Path of the durable cart slot.
    pub cart_slot: PathBuf,

    /// Shipping rule parameters.
    pub pricing: PricingRules,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "Vitrine".to_owned(),
            order_prefix: "VN".to_owned(),
            cart_slot: PathBuf::from("cart.json"),
            pricing: PricingRules::default(),
        }
    }
}

impl StoreConfig {
    /// Parse configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if it does not parse.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.into())?;

        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_the_storefront() {
        let config = StoreConfig::default();

        assert_eq!(config.order_prefix, "VN");
        assert_eq!(config.pricing.free_shipping_threshold, 2000_00);
        assert_eq!(config.pricing.flat_shipping_fee, 55_00);
    }

    #[test]
    fn yaml_overrides_selected_fields() -> TestResult {
        let config = StoreConfig::from_yaml(
            "store_name: Atelier\npricing:\n  flat_shipping_fee: 7500\n",
        )?;

        assert_eq!(config.store_name, "Atelier");
        assert_eq!(config.pricing.flat_shipping_fee, 75_00);
        assert_eq!(config.pricing.free_shipping_threshold, 2000_00);
        assert_eq!(config.order_prefix, "VN");

        Ok(())
    }

    #[test]
    fn load_reads_a_config_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("store.yaml");
        fs::write(&path, "order_prefix: AT\n")?;

        let config = StoreConfig::load(path)?;

        assert_eq!(config.order_prefix, "AT");

        Ok(())
    }
}

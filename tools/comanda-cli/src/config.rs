//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use comanda_core::checkout::{CheckoutPolicy, DEFAULT_HANDOFF_BASE_URL};
use comanda_core::schedule::BusinessHours;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_NAMES: [&str; 3] = ["comanda.toml", ".comanda.toml", "comanda.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComandaConfig {
    /// Store metadata.
    #[serde(default)]
    pub store: StoreConfig,

    /// Business hours.
    #[serde(default)]
    pub hours: BusinessHours,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutPolicy,

    /// Where orders are sent.
    #[serde(default)]
    pub handoff: HandoffConfig,

    /// Menu source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,
}

impl ComandaConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Store metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Display name.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "BG-14".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

/// Handoff configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffConfig {
    /// Contact that receives orders (phone number with country code).
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Click-to-chat base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_destination() -> String {
    "5212414073434".to_string()
}

fn default_base_url() -> String {
    DEFAULT_HANDOFF_BASE_URL.to_string()
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            base_url: default_base_url(),
        }
    }
}

/// Menu source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Menu JSON file, relative to the config file.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "menu.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory of the cart cache, relative to the config file.
    #[serde(default = "default_cart_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub key: String,
}

fn default_cart_dir() -> String {
    ".comanda".to_string()
}

fn default_cart_key() -> String {
    "myRestaurantCart".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            dir: default_cart_dir(),
            key: default_cart_key(),
        }
    }
}

/// Generate a default comanda.toml config file.
///
/// The store name is written as escaped TOML strings.
pub fn generate_default_config(name: &str) -> String {
    let store_name = toml::Value::String(name.to_string());
    let order_label = toml::Value::String(format!("PEDIDO {}", name));
    format!(
        r#"# comanda storefront configuration

[store]
name = {store_name}

# Orders are accepted from `open` up to, but not including, `close`.
[hours]
open = "07:30"
close = "17:00"

[checkout]
order_label = {order_label}
lockout_secs = 5
order_types = ["Para llevar", "Comer aquí"]

[handoff]
destination = "5212414073434"
base_url = "https://wa.me"

[catalog]
path = "menu.json"

[cart]
dir = ".comanda"
key = "myRestaurantCart"
"#,
        store_name = store_name,
        order_label = order_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config: ComandaConfig = toml::from_str(&generate_default_config("BG-14")).unwrap();
        assert_eq!(config.store.name, "BG-14");
        assert_eq!(config.checkout.order_label, "PEDIDO BG-14");
        assert_eq!(config.hours, BusinessHours::default());
        assert_eq!(config.handoff.destination, "5212414073434");
        assert_eq!(config.cart.key, "myRestaurantCart");
    }

    #[test]
    fn test_generated_config_escapes_name() {
        let name = "Bob\"s \\ Tacos";
        let config: ComandaConfig = toml::from_str(&generate_default_config(name)).unwrap();
        assert_eq!(config.store.name, name);
        assert_eq!(config.checkout.order_label, format!("PEDIDO {}", name));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ComandaConfig = toml::from_str("").unwrap();
        assert_eq!(config.catalog.path, "menu.json");
        assert_eq!(config.checkout.lockout_secs, 5);
        assert_eq!(config.hours.close_minute(), 17 * 60);
    }

    #[test]
    fn test_partial_hours_override() {
        let config: ComandaConfig = toml::from_str(
            r#"
            [hours]
            open = "08:00"
            close = "23:40"
            "#,
        )
        .unwrap();
        assert_eq!(config.hours.close_minute(), 1420);
    }

    #[test]
    fn test_hours_with_only_close() {
        let config: ComandaConfig = toml::from_str("[hours]\nclose = \"23:40\"\n").unwrap();
        assert_eq!(config.hours.open_minute(), 450);
        assert_eq!(config.hours.close_minute(), 1420);
    }

    #[test]
    fn test_inverted_hours_rejected() {
        let result: Result<ComandaConfig, _> = toml::from_str(
            r#"
            [hours]
            open = "18:00"
            close = "08:00"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda.json");
        ComandaConfig::default().save(&path).unwrap();
        let loaded = ComandaConfig::load(&path).unwrap();
        assert_eq!(loaded.store.name, "BG-14");
        assert_eq!(loaded.hours, BusinessHours::default());
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda.toml");
        let mut config = ComandaConfig::default();
        config.checkout.lockout_secs = 9;
        config.save(&path).unwrap();
        assert_eq!(ComandaConfig::load(&path).unwrap().checkout.lockout_secs, 9);
    }
}

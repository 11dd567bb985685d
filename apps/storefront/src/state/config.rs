//! # Storefront Configuration
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`atelier.toml`)
//! 3. Environment variables (`ATELIER_*`)
//!
//! ## Example `atelier.toml`
//! ```toml
//! storage = "sqlite"
//! data_dir = "/var/lib/atelier"
//! cart_storage_key = "cartState_v1"
//! whatsapp_number = "584249539367"
//! fallback_usd_rate = 150.0
//! ```
//!
//! Read-only after startup, so no lock needed.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use atelier_core::validation::validate_whatsapp_number;
use atelier_core::{UsdRate, CART_STORAGE_KEY, DEFAULT_USD_RATE, DEFAULT_WHATSAPP_NUMBER};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the cart document is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Lost on exit.
    Memory,

    /// One JSON file per key under `data_dir/cart`.
    File,

    /// `kv_store` table in `data_dir/atelier.db`.
    #[default]
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageKind::Memory),
            "file" | "json" => Ok(StorageKind::File),
            "sqlite" | "db" => Ok(StorageKind::Sqlite),
            other => Err(ConfigError::Invalid(format!(
                "unknown storage kind '{}', expected memory, file or sqlite",
                other
            ))),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Cart storage backend.
    /// Default: sqlite
    pub storage: StorageKind,

    /// Directory for the database and cart files.
    /// Default: the platform data directory
    pub data_dir: PathBuf,

    /// Storage key of the cart document.
    /// Default: "cartState_v1"
    pub cart_storage_key: String,

    /// Number orders are sent to, digits only.
    pub whatsapp_number: String,

    /// Rate used until an administrator sets one.
    /// Default: 150
    pub fallback_usd_rate: f64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            storage: StorageKind::default(),
            data_dir: Self::default_data_dir(),
            cart_storage_key: CART_STORAGE_KEY.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            fallback_usd_rate: DEFAULT_USD_RATE,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or `atelier.toml` in the platform
    ///    config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cart_storage_key.is_empty() {
            return Err(ConfigError::Invalid("cart_storage_key must not be empty".into()));
        }

        // The key doubles as a file name for the file backend
        if !self
            .cart_storage_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ConfigError::Invalid(format!(
                "cart_storage_key '{}' may only contain letters, digits, '_', '-' and '.'",
                self.cart_storage_key
            )));
        }

        validate_whatsapp_number(&self.whatsapp_number)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        UsdRate::new(self.fallback_usd_rate).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies `ATELIER_*` overrides; `lookup` returns a variable's value.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(kind) = lookup("ATELIER_STORAGE") {
            match kind.parse() {
                Ok(parsed) => {
                    debug!(storage = %kind, "Overriding storage backend from environment");
                    self.storage = parsed;
                }
                Err(e) => warn!(storage = %kind, "Ignoring ATELIER_STORAGE: {}", e),
            }
        }

        if let Some(dir) = lookup("ATELIER_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("ATELIER_CART_KEY") {
            self.cart_storage_key = key;
        }

        if let Some(number) = lookup("ATELIER_WHATSAPP_NUMBER") {
            self.whatsapp_number = number;
        }

        if let Some(rate) = lookup("ATELIER_FALLBACK_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => self.fallback_usd_rate = r,
                Err(_) => warn!(rate = %rate, "Ignoring unparseable ATELIER_FALLBACK_RATE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "atelier", "storefront")
            .map(|dirs| dirs.config_dir().join("atelier.toml"))
    }

    fn default_data_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "atelier", "storefront")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./data"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("atelier.db")
    }

    /// Directory of the file storage backend.
    pub fn cart_dir(&self) -> PathBuf {
        self.data_dir.join("cart")
    }

    /// The fallback rate, or the built-in default if it is somehow invalid.
    pub fn fallback_rate(&self) -> UsdRate {
        UsdRate::new(self.fallback_usd_rate).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::default();

        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.cart_storage_key, "cartState_v1");
        assert_eq!(config.whatsapp_number, "584249539367");
        assert_eq!(config.fallback_rate().value(), 150.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("FILE".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert_eq!(" sqlite ".parse::<StorageKind>().unwrap(), StorageKind::Sqlite);
        assert!("redis".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("ATELIER_STORAGE", "file"),
            ("ATELIER_DATA_DIR", "/tmp/atelier"),
            ("ATELIER_CART_KEY", "cartState_v2"),
            ("ATELIER_WHATSAPP_NUMBER", "14155550100"),
            ("ATELIER_FALLBACK_RATE", "36.5"),
        ]));

        assert_eq!(config.storage, StorageKind::File);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/atelier"));
        assert_eq!(config.cart_dir(), PathBuf::from("/tmp/atelier/cart"));
        assert_eq!(config.cart_storage_key, "cartState_v2");
        assert_eq!(config.whatsapp_number, "14155550100");
        assert_eq!(config.fallback_usd_rate, 36.5);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("ATELIER_STORAGE", "redis"),
            ("ATELIER_FALLBACK_RATE", "lots"),
        ]));

        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.fallback_usd_rate, 150.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.cart_storage_key = "../etc/passwd".into();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.whatsapp_number = "+58 424".into();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.fallback_usd_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atelier.toml");
        std::fs::write(&path, "storage = \"memory\"\nfallback_usd_rate = 40.0\n").unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();

        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.fallback_usd_rate, 40.0);
        // Unset fields keep their defaults
        assert_eq!(config.cart_storage_key, "cartState_v1");
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atelier.toml");
        std::fs::write(&path, "storage = [").unwrap();

        assert!(matches!(
            StorefrontConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}

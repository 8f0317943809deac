//! Configuration management for PerpusTB

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Which key-value backend holds persisted state
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory used by the file backend
    pub path: PathBuf,
    pub redis_url: String,
    /// Prepended to every persisted key
    pub key_prefix: String,
}

/// Longest borrow window accepted from configuration
pub const MAX_BORROW_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BorrowingConfig {
    /// Earliest allowed return date, in days from now
    pub min_days: i64,
    /// Latest allowed return date, in days from now
    pub max_days: i64,
    pub default_days: i64,
    /// Display-only late fee label
    pub fine_label: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub borrowing: BorrowingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // PERPUSTB_STORAGE__BACKEND=redis, PERPUSTB_BORROWING__MAX_DAYS=21, ...
            .add_source(
                Environment::with_prefix("PERPUSTB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("storage.redis_url", env::var("REDIS_URL").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.borrowing.check()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], falling back to defaults when the sources are unusable
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("data/storage"),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "@perpustb_".to_string(),
        }
    }
}

impl Default for BorrowingConfig {
    fn default() -> Self {
        Self {
            min_days: 1,
            max_days: 30,
            default_days: 14,
            fine_label: "Rp 1.000/hari".to_string(),
        }
    }
}

impl BorrowingConfig {
    /// Day counts must satisfy `0 <= min <= default <= max <= MAX_BORROW_DAYS`
    pub fn check(&self) -> Result<(), ConfigError> {
        let ordered = 0 <= self.min_days
            && self.min_days <= self.default_days
            && self.default_days <= self.max_days
            && self.max_days <= MAX_BORROW_DAYS;
        if ordered {
            return Ok(());
        }
        Err(ConfigError::Message(format!(
            "borrowing days out of range: min {}, default {}, max {} (limit {})",
            self.min_days, self.default_days, self.max_days, MAX_BORROW_DAYS
        )))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

//! # Application Configuration
//!
//! Settings the back office needs before any inventory is loaded.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_DB_PATH=/data/stockroom.db                               │
//! │     STOCKROOM_LOG=debug                                                │
//! │     STOCKROOM_SEED_DEFAULTS=false                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit --config path, else                                       │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │     ~/Library/Application Support/com.stockroom.backoffice/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! path = "/var/lib/stockroom/stockroom.db"
//! max_connections = 5
//!
//! [logging]
//! filter = "info,stockroom=debug,sqlx=warn"
//!
//! [inventory]
//! seed_default_categories = true
//! ```
//!
//! These are process settings. The inventory's own `Settings` (company
//! name, threshold, currency) live in the store and are edited from the UI.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Default tracing filter when neither RUST_LOG nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,stockroom=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "stockroom.toml";
const DATABASE_FILE_NAME: &str = "stockroom.db";

// =============================================================================
// Sections
// =============================================================================

/// Where the key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// SQLite file. `None` means the platform data directory.
    pub path: Option<PathBuf>,

    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            path: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Start an empty store with the default categories.
    pub seed_default_categories: bool,
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            seed_default_categories: true,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub inventory: InventorySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit path that doesn't exist is an error; a missing default
    /// config file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::Config("store.path must not be empty".into()));
            }
        }

        if self.store.max_connections == 0 {
            return Err(AppError::Config(
                "store.max_connections must be greater than 0".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(AppError::Config("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `STOCKROOM_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("STOCKROOM_DB_PATH") {
            debug!(path = %path, "Overriding store path from environment");
            self.store.path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("STOCKROOM_LOG") {
            self.logging.filter = filter;
        }

        if let Some(seed) = lookup("STOCKROOM_SEED_DEFAULTS") {
            match seed.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.inventory.seed_default_categories = true,
                "0" | "false" | "no" => self.inventory.seed_default_categories = false,
                _ => warn!(value = %seed, "Ignoring unrecognized STOCKROOM_SEED_DEFAULTS"),
            }
        }
    }

    /// Resolves the database file, creating the data directory if needed.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.store.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".into()))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stockroom", "backoffice")
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.inventory.seed_default_categories);
        assert!(config.store.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            path = "/tmp/stockroom.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/stockroom.db")));
        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("STOCKROOM_DB_PATH", "/data/inv.db"),
            ("STOCKROOM_LOG", "warn"),
            ("STOCKROOM_SEED_DEFAULTS", "false"),
        ]));

        assert_eq!(config.store.path, Some(PathBuf::from("/data/inv.db")));
        assert_eq!(config.logging.filter, "warn");
        assert!(!config.inventory.seed_default_categories);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/data/inv.db"));
    }

    #[test]
    fn test_unrecognized_seed_flag_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("STOCKROOM_SEED_DEFAULTS", "maybe")]));
        assert!(config.inventory.seed_default_categories);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.store.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = AppConfig::load(Some(PathBuf::from("/nonexistent/stockroom.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("[inventory]"));
    }
}

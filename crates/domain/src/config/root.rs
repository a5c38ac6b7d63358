use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::blocking::BlockingConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::refresh::RefreshConfig;
use super::storage::StorageConfig;
use crate::filter_list::FilterList;

/// Main configuration structure for Ferrous Shield
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Filter lists and blocking behaviour
    #[serde(default)]
    pub blocking: BlockingConfig,

    /// On-disk locations for downloaded, bundled and compiled lists
    #[serde(default)]
    pub storage: StorageConfig,

    /// Filter list refresh policy
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Preferences database
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-shield.toml in current directory
    /// 3. /etc/ferrous-shield/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-shield.toml").exists() {
            Self::from_file("ferrous-shield.toml")?
        } else if std::path::Path::new("/etc/ferrous-shield/config.toml").exists() {
            Self::from_file("/etc/ferrous-shield/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level.into();
        }
        if let Some(dir) = overrides.data_directory {
            let root = std::path::PathBuf::from(dir);
            self.storage.list_directory = root.join("lists");
            self.storage.compiled_directory = root.join("compiled");
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Refresh interval cannot be 0".to_string(),
            ));
        }

        if self.refresh.check_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Refresh check interval cannot be 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for list in &self.blocking.lists {
            FilterList::validate_name(&list.name).map_err(ConfigError::Validation)?;

            FilterList::validate_url(&list.url.as_deref().map(Arc::from))
                .map_err(ConfigError::Validation)?;

            if !seen.insert(list.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Filter list '{}' is configured more than once",
                    list.name
                )));
            }
        }

        Ok(())
    }

    /// Filter lists resolved against the bundled directory.
    pub fn filter_lists(&self) -> Vec<FilterList> {
        self.blocking
            .lists
            .iter()
            .map(|l| l.to_filter_list(&self.storage.bundled_directory))
            .collect()
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub data_directory: Option<String>,
}

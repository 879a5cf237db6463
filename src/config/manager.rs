//! Configuration manager for loading and saving application configuration
//!
//! Reads and writes `$JUNKYARD_HOME/config.json` (current directory when the
//! variable is unset). Writes go through a temporary file in the same directory
//! and are persisted with a rename.

use crate::config::models::AppConfig;
use crate::error::{JunkyardError, Result, StringError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the directory that holds config and logs
pub const HOME_ENV_VAR: &str = "JUNKYARD_HOME";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Directory that holds `config.json` and the log files
    pub fn get_home_dir() -> PathBuf {
        std::env::var_os(HOME_ENV_VAR).map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_home_dir().join("config.json")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<AppConfig> {
        Self::load_from(&Self::get_config_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing or unparsable file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            info!("Configuration file {} not found, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        let mut config = match serde_json::from_str::<AppConfig>(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                AppConfig::default()
            }
        };

        if config.sanitize() {
            warn!("Configuration contained invalid values that were reset");
        }
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(config: &AppConfig) -> Result<()> {
        Self::save_to(config, &Self::get_config_path())
    }

    /// Save configuration to `path` with an atomic write
    pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
        let config_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(path).map_err(|e| {
            JunkyardError::ConfigError(StringError::new(format!(
                "Failed to persist {}: {}",
                path.display(),
                e.error
            )))
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

use std::env;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::ConfigError;

/// Data store configuration structure
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the per-collection JSON files
    pub data_dir: PathBuf,
    /// Whether collection files are pretty-printed (human-diffable)
    pub pretty_json: bool,
}

impl StoreConfig {
    /// Load store configuration from environment variables
    ///
    /// Expected environment variables (a .env file is honored if present):
    /// - DATA_DIR: directory for collection files (defaults to ./data)
    /// - DATA_PRETTY_JSON: pretty-print collection files (defaults to true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        info!("Loading store configuration from environment variables");

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| {
            warn!("DATA_DIR not set, using default: ./data");
            "./data".to_string()
        });
        debug!("Data directory: {}", data_dir);

        let pretty_json = match env::var("DATA_PRETTY_JSON") {
            Ok(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue("Invalid DATA_PRETTY_JSON value".to_string())
            })?,
            Err(_) => true,
        };
        debug!("Pretty-printed JSON: {}", pretty_json);

        let config = StoreConfig {
            data_dir: PathBuf::from(data_dir),
            pretty_json,
        };

        config.validate()?;
        info!("Store configuration loaded successfully");
        Ok(config)
    }

    /// Create a StoreConfig rooted at the given directory
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            pretty_json: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Data directory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("./data"),
            pretty_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.pretty_json);
    }

    #[test]
    fn test_new_config() {
        let config = StoreConfig::new("/tmp/reachly-data");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/reachly-data"));
        assert!(config.pretty_json);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let config = StoreConfig::new("");
        assert!(config.validate().is_err());
    }
}

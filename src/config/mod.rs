//! Service configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::store::{PetId, DEFAULT_STARTING_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Top level configuration, loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_starting_id")]
    pub starting_id: PetId,
}

fn default_starting_id() -> PetId {
    DEFAULT_STARTING_ID
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            starting_id: default_starting_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `petstore=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.host must not be empty".to_string(),
            ));
        }

        if !(0..PetId::MAX).contains(&self.store.starting_id) {
            return Err(ConfigError::Validation(format!(
                "store.starting_id must be between 0 and {}, got {}",
                PetId::MAX - 1,
                self.store.starting_id
            )));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|err| {
            ConfigError::Validation(format!(
                "invalid logging.level '{}': {err}",
                self.logging.level
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.starting_id, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml_str("server:\n  port: 9000\n").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let err = Config::from_yaml_str("server:\n  host: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_starting_id_without_headroom_is_rejected() {
        for id in ["9223372036854775807", "-1"] {
            let yaml = format!("store:\n  starting_id: {id}\n");
            let err = Config::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{id} accepted");
        }

        let config = Config::from_yaml_str("store:\n  starting_id: 0\n").unwrap();
        assert_eq!(config.store.starting_id, 0);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.store.starting_id = 1;
        config.logging.level = "petstore=debug".to_string();

        let dir = tempdir().unwrap();
        let path = dir.path().join("petstore.yaml");
        config.to_yaml(&path).unwrap();

        let loaded = Config::from_yaml(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = Config::from_yaml(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

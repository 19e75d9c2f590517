//! Configuration management
//!
//! JSON configuration naming the service account key file plus optional
//! endpoint overrides.
//! Priority for the file location: --config flag / GMP_AUDIT_CONFIG > ./config.json
//! > ~/.config/gmp-audit/config.json

use crate::error::{AppError, ConfigError};
use crate::utils::file::expand_home;
use crate::utils::logging::Logger;
use crate::utils::validation::{validate_base_url, validate_max_concurrency};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_MAX_CONCURRENCY: usize = 1;

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Path to the service account key file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,
    /// Override for `https://tagmanager.googleapis.com/tagmanager/v2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagmanager_base_url: Option<String>,
    /// Override for `https://analyticsadmin.googleapis.com/v1beta`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_admin_base_url: Option<String>,
    /// Width of the in-order fetch pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

impl Config {
    /// Load configuration from a JSON file, failing on a missing or malformed file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
                hint: format!(
                    "Create {} containing {{\"credentials_path\": \"<service-account.json>\"}}",
                    path.display()
                ),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }

    /// Pick the configuration file to read when no explicit path was given
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        match Self::user_config_path() {
            Some(user_path) if user_path.exists() => user_path,
            _ => local,
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".config")
                .join("gmp-audit")
                .join(DEFAULT_CONFIG_FILE)
        })
    }

    /// Service account key path with `~/` expanded
    pub fn credentials_path(&self) -> Result<PathBuf, AppError> {
        let raw = self
            .credentials_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                field: "credentials_path".to_string(),
                field_type: "string".to_string(),
            })?;
        Ok(expand_home(raw)?)
    }

    pub fn max_concurrency(&self) -> Result<usize, ConfigError> {
        validate_max_concurrency(self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY))
    }

    /// Check optional fields that have a constrained shape
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.tagmanager_base_url {
            validate_base_url("tagmanager_base_url", url)?;
        }
        if let Some(url) = &self.analytics_admin_base_url {
            validate_base_url("analytics_admin_base_url", url)?;
        }
        self.max_concurrency()?;
        Ok(())
    }
}

/// Load the configuration, logging and falling back to an empty config on any failure.
pub fn load_config(path: &Path, logger: &Logger) -> Config {
    match Config::load(path) {
        Ok(config) => {
            logger.verbose(&format!("Loaded configuration from {}", path.display()));
            config
        }
        Err(ConfigError::FileNotFound { path, .. }) => {
            logger.error(&format!("Configuration file '{}' not found.", path));
            Config::default()
        }
        Err(e) => {
            logger.error(&format!("Could not read configuration: {}", e));
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.credentials_path.is_none());
        assert_eq!(config.max_concurrency().ok(), Some(1));
    }

    #[test]
    fn test_config_load() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"credentials_path": "keys/sa.json", "max_concurrency": 4}"#,
        )
        .expect("Failed to write config");

        let config = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(config.credentials_path.as_deref(), Some("keys/sa.json"));
        assert_eq!(config.max_concurrency().ok(), Some(4));
        assert_eq!(
            config.credentials_path().expect("path"),
            PathBuf::from("keys/sa.json")
        );
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let result = Config::load(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_config_load_invalid_json() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").expect("Failed to write config");

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_config_is_graceful() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let logger = Logger::silent();

        let config = load_config(&temp_dir.path().join("missing.json"), &logger);
        assert_eq!(config, Config::default());

        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "[1, 2").expect("Failed to write config");
        let config = load_config(&broken, &logger);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_credentials_path() {
        let config = Config::default();
        let err = config.credentials_path().unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::MissingField { ref field, .. }) if field == "credentials_path"
        ));

        let config = Config {
            credentials_path: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(config.credentials_path().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            max_concurrency: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            tagmanager_base_url: Some("localhost:9000".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            analytics_admin_base_url: Some("http://127.0.0.1:9000".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = PathBuf::from("/tmp/custom.json");
        assert_eq!(Config::resolve_path(Some(explicit.clone())), explicit);
    }
}

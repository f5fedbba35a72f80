//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `WRP_DEFAULT_NAMESPACE`
const ENV_PREFIX: &str = "WRP";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API endpoint URL
    pub api_url: Option<String>,
    /// Namespace used when `--namespace` is not given
    pub default_namespace: Option<String>,
    /// Pretty-print patches by default
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::debug!(error = %e, "No home directory, using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a JSON file, then apply `WRP_*` env overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("wrp").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(config.api_url.is_none());
        assert!(config.default_namespace.is_none());
        assert!(!config.pretty);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"api_url": "http://localhost:9999", "default_namespace": "prod", "pretty": true}}"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(config.default_namespace.as_deref(), Some("prod"));
        assert!(config.pretty);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_config_path_location() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with(".config/wrp/config.json"));
        }
    }
}

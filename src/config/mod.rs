//! Configuration module
//!
//! Handles loading, validating and writing scenario files, plus environment
//! overrides.

mod env;
mod file;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;

pub use env::EnvConfig;
pub use file::{HealthConfigFile, PaymentConfigFile};
#[cfg(test)]
pub use file::{HealthData, PaymentScenarioConfig};

/// Scenario file validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("baseUrl is empty")]
    MissingBaseUrl,

    #[error("baseUrl must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("Invalid body template: {0}")]
    InvalidBody(String),
}

/// A scenario configuration file on disk.
///
/// JSON is the native format; `.yaml`/`.yml` files are accepted as well.
pub trait ScenarioFile: Serialize + DeserializeOwned + Sized {
    /// Check the loaded file is usable
    fn validate(&self) -> Result<(), ConfigError>;

    /// Apply environment overrides
    fn apply_env(&mut self, env: &EnvConfig);

    /// Example file written by `config init`
    fn example() -> Self;

    /// Parse, apply overrides and validate
    fn load(path: impl AsRef<Path>, env: &EnvConfig) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.apply_env(env);
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to file
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

/// Shared base URL validation
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.trim().is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert_eq!(validate_base_url(""), Err(ConfigError::MissingBaseUrl));
        assert_eq!(
            validate_base_url("ftp://x"),
            Err(ConfigError::InvalidBaseUrl("ftp://x".to_string()))
        );
        assert!(validate_base_url("http://x").is_ok());
    }

    #[test]
    fn test_is_yaml_file() {
        assert!(is_yaml_file(Path::new("health.yml")));
        assert!(!is_yaml_file(Path::new("health.json")));
    }
}

//! Configuration management for termhub.
//!
//! Handles loading of user preferences, most importantly where the command
//! execution service lives.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Execution service configuration
    #[serde(default)]
    pub exec: ExecConfig,
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;

        Ok(config_dir.join("termhub").join("config.json"))
    }
}

/// Where and how to reach the command execution service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Base URL of the execution service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8791".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ExecConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.exec.base_url, "http://127.0.0.1:8791");
        assert_eq!(config.exec.timeout_secs, 300);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"exec":{"base_url":"http://10.0.0.2:9000"}}"#).unwrap();
        assert_eq!(config.exec.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.exec.timeout_secs, 300);
    }

    #[test]
    fn test_empty_config_parses_as_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.exec.base_url, "http://127.0.0.1:8791");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.exec.base_url, config.exec.base_url);
        assert_eq!(parsed.exec.timeout_secs, config.exec.timeout_secs);
    }
}

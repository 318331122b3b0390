//! Configuration management for blvm-zmq
//!
//! Handles configuration loading (TOML or JSON) and validation.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use crate::zmq::{ConfigError, PayloadFormat, ZmqConfig};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "blvm_zmq=debug,zmq=trace")
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    #[serde(default)]
    pub filter: Option<String>,

    /// Enable JSON logging format (for log aggregation systems)
    #[serde(default)]
    pub json_format: bool,
}

/// Top-level notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NotifyConfig {
    /// ZMQ publisher configuration (None = notifications disabled)
    #[serde(default)]
    pub zmq: Option<ZmqConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl NotifyConfig {
    /// Load configuration from file (TOML for `.toml`, JSON otherwise)
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            Self::from_toml_file(path)
        } else {
            Self::from_json_file(path)
        }
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: NotifyConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: NotifyConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_toml_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize TOML config: {}", e))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref zmq) = self.zmq {
            zmq.validate().context("Invalid [zmq] configuration")?;
        }
        Ok(())
    }
}

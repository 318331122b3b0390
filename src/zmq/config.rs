//! ZMQ notification configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Endpoint transports accepted by libzmq
const SUPPORTED_SCHEMES: &[&str] = &["tcp", "ipc", "inproc", "pgm", "epgm"];

/// Payload carried in the second frame of each notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PayloadFormat {
    /// 32-byte transaction id / block hash
    #[serde(rename = "hash")]
    IdentifierOnly,
    /// Transaction or block in network wire format
    #[default]
    #[serde(rename = "raw", alias = "network")]
    FullSerialization,
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadFormat::IdentifierOnly => write!(f, "hash"),
            PayloadFormat::FullSerialization => write!(f, "raw"),
        }
    }
}

impl FromStr for PayloadFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(PayloadFormat::IdentifierOnly),
            "raw" | "network" => Ok(PayloadFormat::FullSerialization),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("ZMQ endpoint is empty")]
    EmptyEndpoint,
    #[error("ZMQ endpoint {0:?} has no transport prefix (expected e.g. tcp://)")]
    MissingScheme(String),
    #[error("ZMQ endpoint {0:?} uses an unsupported transport")]
    UnsupportedScheme(String),
    #[error("unknown ZMQ payload format {0:?} (expected \"hash\" or \"raw\")")]
    UnknownFormat(String),
}

/// ZMQ configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZmqConfig {
    /// PUB socket endpoint (e.g., "tcp://127.0.0.1:28332")
    #[serde(default)]
    pub pub_endpoint: Option<String>,

    /// Payload format for all notifications
    #[serde(default)]
    pub format: PayloadFormat,
}

impl ZmqConfig {
    /// Check if ZMQ notifications are enabled
    pub fn is_enabled(&self) -> bool {
        self.pub_endpoint.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.pub_endpoint {
            Some(ref endpoint) => validate_endpoint(endpoint),
            None => Ok(()),
        }
    }

    /// Build from command-line style switches
    ///
    /// Recognizes `-zmqpub=<endpoint>` and `-zmqformat=hash|raw` (one or two
    /// leading dashes). Other arguments are ignored.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = ZmqConfig::default();
        for arg in args {
            let arg = arg.as_ref().trim_start_matches('-');
            if let Some(endpoint) = arg.strip_prefix("zmqpub=") {
                config.pub_endpoint = Some(endpoint.to_string());
            } else if let Some(format) = arg.strip_prefix("zmqformat=") {
                config.format = format.parse()?;
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// Check that an endpoint looks like `transport://address`
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    if endpoint.trim().is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }
    let (scheme, address) = endpoint
        .split_once("://")
        .ok_or_else(|| ConfigError::MissingScheme(endpoint.to_string()))?;
    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(ConfigError::UnsupportedScheme(endpoint.to_string()));
    }
    if address.is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zmq_config_is_enabled() {
        let config = ZmqConfig {
            pub_endpoint: Some("tcp://127.0.0.1:28332".to_string()),
            ..Default::default()
        };
        assert!(config.is_enabled());
        assert!(!ZmqConfig::default().is_enabled());
    }

    #[test]
    fn test_default_format_is_raw() {
        assert_eq!(ZmqConfig::default().format, PayloadFormat::FullSerialization);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("hash".parse::<PayloadFormat>().unwrap(), PayloadFormat::IdentifierOnly);
        assert_eq!("RAW".parse::<PayloadFormat>().unwrap(), PayloadFormat::FullSerialization);
        assert_eq!(
            "network".parse::<PayloadFormat>().unwrap(),
            PayloadFormat::FullSerialization
        );
        assert_eq!(
            "json".parse::<PayloadFormat>(),
            Err(ConfigError::UnknownFormat("json".to_string()))
        );
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [PayloadFormat::IdentifierOnly, PayloadFormat::FullSerialization] {
            assert_eq!(format.to_string().parse::<PayloadFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("tcp://127.0.0.1:28332").is_ok());
        assert!(validate_endpoint("inproc://test").is_ok());
        assert!(validate_endpoint("ipc:///tmp/blvm.sock").is_ok());
        assert_eq!(validate_endpoint(""), Err(ConfigError::EmptyEndpoint));
        assert_eq!(validate_endpoint("tcp://"), Err(ConfigError::EmptyEndpoint));
        assert!(matches!(
            validate_endpoint("127.0.0.1:28332"),
            Err(ConfigError::MissingScheme(_))
        ));
        assert!(matches!(
            validate_endpoint("http://127.0.0.1"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_from_args() {
        let config = ZmqConfig::from_args([
            "-datadir=/tmp/x",
            "-zmqpub=tcp://127.0.0.1:28332",
            "--zmqformat=hash",
        ])
        .unwrap();
        assert_eq!(config.pub_endpoint.as_deref(), Some("tcp://127.0.0.1:28332"));
        assert_eq!(config.format, PayloadFormat::IdentifierOnly);
    }

    #[test]
    fn test_from_args_without_endpoint_is_disabled() {
        let config = ZmqConfig::from_args(["-server"]).unwrap();
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_from_args_rejects_bad_endpoint() {
        assert!(ZmqConfig::from_args(["-zmqpub=localhost"]).is_err());
    }
}

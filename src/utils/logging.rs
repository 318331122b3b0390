//! Logging initialization
//!
//! `RUST_LOG` takes precedence over the configured filter; the default
//! filter is "info". Initialization is first-wins: later calls are no-ops.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info";

fn build_filter(filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)))
}

/// Initialize human-readable logging
pub fn init_logging(filter: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_target(true)
        .try_init();
}

/// Initialize JSON logging (for log aggregation systems)
#[cfg(feature = "json-logging")]
pub fn init_json_logging(filter: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(build_filter(filter))
        .try_init();
}

/// Initialize logging from an optional [`LoggingConfig`]
///
/// Falls back to text output when JSON is requested but the `json-logging`
/// feature is not compiled in.
pub fn init_logging_from_config(config: Option<&LoggingConfig>) {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);
    let filter = config.filter.as_deref();

    #[cfg(feature = "json-logging")]
    {
        if config.json_format {
            init_json_logging(filter);
            return;
        }
    }

    init_logging(filter);

    #[cfg(not(feature = "json-logging"))]
    {
        if config.json_format {
            tracing::warn!("JSON logging requested but the json-logging feature is disabled");
        }
    }
}

//! Structured logging infrastructure for tscat

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level string is not a valid filter directive
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser error from `tracing-subscriber`
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "`tscat_catalog=trace`")
    pub level: String,
    /// Emit one JSON object per event
    pub json_format: bool,
    /// Multi-line human readable output; ignored when `json_format` is set
    pub pretty_format: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the filter for this configuration without installing anything.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidFilter`] when `level` is not a valid
    /// `EnvFilter` directive.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        parse_filter(&self.level)
    }
}

/// Parse a filter directive such as `info` or `tscat_catalog=debug,warn`.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] for malformed directives.
pub fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidFilter {
        filter: level.to_string(),
        source,
    })
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Output goes to stderr so that command output on stdout stays clean.
///
/// # Errors
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .compact()
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    }

    tracing::debug!(level = %config.level, json = config.json_format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.include_targets);
    }

    #[test]
    fn test_parse_filter_accepts_directives() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("tscat_catalog=trace,warn").is_ok());
    }

    #[test]
    fn test_parse_filter_rejects_garbage() {
        let err = parse_filter("tscat=notalevel").unwrap_err();
        assert!(err.to_string().contains("tscat=notalevel"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LoggingConfig = serde_yaml::from_str("level: debug\n").unwrap();
        assert_eq!(config.level, "debug");
        assert!(!config.pretty_format);
    }
}

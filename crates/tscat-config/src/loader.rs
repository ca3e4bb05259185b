//! Configuration loading with environment variable overrides

use crate::defaults::CONFIG_FILE_NAMES;
use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "TSCAT_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field holds an unusable value
    #[error("Invalid configuration field '{field}': {message}")]
    Validation {
        /// Dotted path of the field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Parser error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, an
    /// override cannot be parsed, or the result fails validation.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load from `explicit`, or the discovered file, or the defaults
    ///
    /// # Errors
    ///
    /// As [`ConfigLoader::load_config`].
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = Self::discover(explicit, |var| env::var(var).ok(), Path::is_file) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML into a configuration without overrides or validation
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        // An empty document means all defaults
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Pick the configuration file: `explicit`, then `TSCAT_CONFIG_PATH`,
    /// then the first of `tscat.yaml` / `tscat.yml` that `exists`.
    pub fn discover<V, E>(explicit: Option<&Path>, var: V, exists: E) -> Option<PathBuf>
    where
        V: Fn(&str) -> Option<String>,
        E: Fn(&Path) -> bool,
    {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = var(CONFIG_PATH_VAR).filter(|path| !path.is_empty()) {
            return Some(PathBuf::from(path));
        }
        CONFIG_FILE_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| exists(path))
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] when a variable cannot be parsed.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `var`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] when a variable cannot be parsed.
    pub fn apply_overrides<V>(config: &mut Config, var: V) -> Result<(), ConfigError>
    where
        V: Fn(&str) -> Option<String>,
    {
        // Translation overrides
        if let Some(directory) = var("TSCAT_TRANSLATIONS_DIR") {
            config.translations.directory = PathBuf::from(directory);
        }

        if let Some(prefix) = var("TSCAT_FILE_PREFIX") {
            config.translations.file_prefix = prefix;
        }

        if let Some(language) = var("TSCAT_LANGUAGE") {
            config.translations.language = language;
        }

        // Logging overrides
        if let Some(level) = var("TSCAT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = var("TSCAT_LOG_JSON") {
            config.logging.json_format = json.trim().parse().map_err(|e| ConfigError::EnvParse {
                var: "TSCAT_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}

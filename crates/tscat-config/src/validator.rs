//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config.validate()
    }
}

impl Config {
    /// Check that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let translations = &self.translations;
        if translations.directory.as_os_str().is_empty() {
            return Err(invalid("translations.directory", "must not be empty"));
        }
        if translations.file_prefix.trim().is_empty() {
            return Err(invalid("translations.file_prefix", "must not be empty"));
        }
        if let Err(e) = translations.language.replace('_', "-").parse::<LanguageIdentifier>() {
            return Err(invalid(
                "translations.language",
                &format!("'{}' is not a language identifier: {e}", translations.language),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(invalid("logging.level", "must not be empty"));
        }
        if let Err(e) = self.logging.env_filter() {
            return Err(invalid("logging.level", &e.to_string()));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_prefix() {
        let mut config = Config::default();
        config.translations.file_prefix = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "translations.file_prefix"
        ));
    }

    #[test]
    fn test_language_with_underscore_is_accepted() {
        let mut config = Config::default();
        config.translations.language = "lt_LT".to_string();
        assert!(config.validate().is_ok());

        config.translations.language = "not a language".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "translations.language"
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "tscat=notalevel".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "logging.level"
        ));
    }
}

//! Application-wide error types using thiserror.

use std::path::PathBuf;
use tscat_catalog::{ParseError, SubstitutionError, TranslatorError};
use tscat_common::LoggingError;
use tscat_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A resource failed to load.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Placeholder substitution failed.
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    /// The requested locale could not be published.
    #[error(transparent)]
    Translator(#[from] TranslatorError),

    /// Writing output failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path, `-` for stdout
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tscat_common::LoggingConfig;

/// Main configuration structure for tscat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where translation resources live.
    pub translations: TranslationsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Translation resource configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Directory holding the `.ts` files.
    pub directory: PathBuf,
    /// File name prefix, as in `<prefix>_<language>.ts`.
    pub file_prefix: String,
    /// Language used when a command does not name one.
    pub language: String,
}

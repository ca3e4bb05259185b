//! Default values.

use crate::schema::TranslationsConfig;
use std::path::PathBuf;

/// Default resource directory.
pub const DEFAULT_DIRECTORY: &str = "i18n";

/// Default resource file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "qfield";

/// Default language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// File names searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tscat.yaml", "tscat.yml"];

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

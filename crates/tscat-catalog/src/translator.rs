//! Locale switching with atomic catalog publication

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};
use unic_langid::LanguageIdentifier;

use crate::error::{SubstitutionError, TranslatorError};
use crate::model::Catalog;
use crate::parser::load_file;

/// Parse a language tag, accepting both `lt-LT` and `lt_LT`
///
/// # Errors
///
/// Returns [`TranslatorError::InvalidLanguage`] when the tag is not a valid
/// language identifier.
pub fn parse_language(tag: &str) -> Result<LanguageIdentifier, TranslatorError> {
    tag.replace('_', "-")
        .parse::<LanguageIdentifier>()
        .map_err(|source| TranslatorError::InvalidLanguage {
            tag: tag.to_string(),
            source,
        })
}

/// Finds `<prefix>_<language>.ts` files in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    directory: PathBuf,
    prefix: String,
}

impl ResourceLocator {
    /// Create a locator for `directory` and file name `prefix`
    pub fn new(directory: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// Directory searched for resources
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Paths tried for `language`, most specific first
    ///
    /// `lt-LT` gives `prefix_lt_LT.ts`, then `prefix_lt.ts`.
    pub fn candidates(&self, language: &LanguageIdentifier) -> Vec<PathBuf> {
        let full = language.to_string().replace('-', "_");
        let bare = language.language.as_str();

        let mut names = vec![full];
        if names[0] != bare {
            names.push(bare.to_string());
        }

        names
            .into_iter()
            .map(|name| self.directory.join(format!("{}_{}.ts", self.prefix, name)))
            .collect()
    }

    /// First existing candidate for `language`
    ///
    /// # Errors
    ///
    /// Returns [`TranslatorError::ResourceNotFound`] listing every path tried.
    pub fn locate(&self, language: &LanguageIdentifier) -> Result<PathBuf, TranslatorError> {
        let candidates = self.candidates(language);
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Ok(path.clone()),
            None => {
                warn!("No translation resource for {} in {:?}", language, self.directory);
                Err(TranslatorError::ResourceNotFound {
                    language: language.to_string(),
                    candidates,
                })
            }
        }
    }
}

#[derive(Debug)]
struct Published {
    language: Option<LanguageIdentifier>,
    catalog: Arc<Catalog>,
}

impl Published {
    fn base() -> Self {
        Self {
            language: None,
            catalog: Arc::new(Catalog::empty()),
        }
    }
}

/// Holds the catalog of the active locale
///
/// Readers take [`Arc<Catalog>`] snapshots without locking; a switch
/// replaces the whole catalog at once, so a reader sees either the old or
/// the new catalog and never a mix.
pub struct Translator {
    locator: ResourceLocator,
    published: ArcSwap<Published>,
}

impl Translator {
    /// Create a translator publishing the empty base catalog
    pub fn new(locator: ResourceLocator) -> Self {
        Self {
            locator,
            published: ArcSwap::from_pointee(Published::base()),
        }
    }

    /// Load the resource for `tag` and publish it
    ///
    /// On failure the previously published catalog stays active.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslatorError`] when the tag is invalid, no resource
    /// exists for it, or the resource fails to load.
    pub fn switch_locale(&self, tag: &str) -> Result<Arc<Catalog>, TranslatorError> {
        let language = parse_language(tag)?;
        let path = self.locator.locate(&language)?;
        debug!("Switching locale to {} from {:?}", language, path);

        let catalog = load_file(&path).map_err(|source| TranslatorError::Load {
            path: path.clone(),
            source,
        })?;

        if let Some(declared) = catalog.language() {
            let matches = parse_language(declared)
                .map(|declared| declared.language == language.language)
                .unwrap_or(false);
            if !matches {
                warn!(
                    "Resource {:?} declares language '{}', requested {}",
                    path, declared, language
                );
            }
        }

        let catalog = Arc::new(catalog);
        self.published.store(Arc::new(Published {
            language: Some(language.clone()),
            catalog: Arc::clone(&catalog),
        }));
        info!("Published {} messages for locale {}", catalog.message_count(), language);

        Ok(catalog)
    }

    /// Publish the empty base catalog; every lookup falls back to source
    pub fn reset(&self) {
        self.published.store(Arc::new(Published::base()));
        info!("Reset to the base catalog");
    }

    /// Snapshot of the published catalog
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.published.load().catalog)
    }

    /// Language of the published catalog, `None` for the base catalog
    pub fn language(&self) -> Option<LanguageIdentifier> {
        self.published.load().language.clone()
    }

    /// Resource locator in use
    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// Translate with the published catalog; see [`Catalog::lookup`]
    ///
    /// # Errors
    ///
    /// As [`Catalog::lookup`].
    pub fn tr(&self, context: &str, source: &str, args: &[&str]) -> Result<String, SubstitutionError> {
        self.published.load().catalog.lookup(context, source, args)
    }

    /// Translate a numerus message with the published catalog
    ///
    /// # Errors
    ///
    /// As [`Catalog::lookup`].
    pub fn tr_plural(
        &self,
        context: &str,
        source: &str,
        count: i64,
        args: &[&str],
    ) -> Result<String, SubstitutionError> {
        self.published
            .load()
            .catalog
            .translate_plural(context, source, None, count, args)
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let published = self.published.load();
        f.debug_struct("Translator")
            .field("locator", &self.locator)
            .field("language", &published.language)
            .field("messages", &published.catalog.message_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscat_common::test_utils::{create_temp_dir, ts_fixtures, write_resource};

    #[test]
    fn test_parse_language_accepts_underscore() {
        let language = parse_language("lt_LT").unwrap();
        assert_eq!(language.to_string(), "lt-LT");
        assert!(matches!(
            parse_language("not a tag!"),
            Err(TranslatorError::InvalidLanguage { .. })
        ));
    }

    #[test]
    fn test_candidates_order() {
        let locator = ResourceLocator::new("i18n", "qfield");
        let language = parse_language("lt-LT").unwrap();
        assert_eq!(
            locator.candidates(&language),
            vec![PathBuf::from("i18n/qfield_lt_LT.ts"), PathBuf::from("i18n/qfield_lt.ts")]
        );

        let bare = parse_language("lt").unwrap();
        assert_eq!(locator.candidates(&bare), vec![PathBuf::from("i18n/qfield_lt.ts")]);
    }

    #[test]
    fn test_switch_falls_back_to_bare_language() {
        let dir = create_temp_dir();
        write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());

        let translator = Translator::new(ResourceLocator::new(dir.path(), "qfield"));
        assert_eq!(translator.tr("DateTime", "Ok", &[]).unwrap(), "Ok");

        translator.switch_locale("lt_LT").unwrap();
        assert_eq!(translator.tr("DateTime", "Ok", &[]).unwrap(), "Gerai");
        assert_eq!(translator.language().map(|l| l.to_string()), Some("lt-LT".to_string()));
    }

    #[test]
    fn test_failed_switch_keeps_catalog() {
        let dir = create_temp_dir();
        write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());
        write_resource(dir.path(), "qfield_de.ts", "<TS version=\"2.1\"><context>");

        let translator = Translator::new(ResourceLocator::new(dir.path(), "qfield"));
        translator.switch_locale("lt").unwrap();

        assert!(matches!(translator.switch_locale("de"), Err(TranslatorError::Load { .. })));
        assert!(matches!(
            translator.switch_locale("fr"),
            Err(TranslatorError::ResourceNotFound { ref candidates, .. }) if candidates.len() == 1
        ));
        assert_eq!(translator.tr("DateTime", "Ok", &[]).unwrap(), "Gerai");

        translator.reset();
        assert!(translator.language().is_none());
        assert_eq!(translator.tr("DateTime", "Ok", &[]).unwrap(), "Ok");
    }
}

//! Translation lookup with source-text fallback

use tracing::debug;

use crate::error::SubstitutionError;
use crate::model::{Catalog, Message, TranslationText};
use crate::placeholder::{substitute, substitute_plural};

/// Where a resolved string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A finished translation
    Translation,
    /// No usable translation; the source text is shown instead
    SourceFallback,
}

/// Raw text chosen for a lookup, before placeholder substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The chosen text
    pub text: &'a str,
    /// Where the text came from
    pub origin: Origin,
}

impl<'a> Resolved<'a> {
    fn translation(text: &'a str) -> Self {
        Self {
            text,
            origin: Origin::Translation,
        }
    }

    fn fallback(source: &'a str) -> Self {
        Self {
            text: source,
            origin: Origin::SourceFallback,
        }
    }

    /// Whether the source text is shown instead of a translation
    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::SourceFallback
    }
}

impl Catalog {
    /// Find the message for (context, source, disambiguation).
    ///
    /// An exact comment match wins; with a disambiguation that matches
    /// nothing, a message without comment is used. Without a disambiguation
    /// only messages without comment match. Duplicates resolve to the first
    /// in document order.
    pub fn find(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&Message> {
        let disambiguation = disambiguation.filter(|comment| !comment.is_empty());
        let mut uncommented = None;

        for message in self.candidates(context, source) {
            let comment = message.disambiguation();
            if comment == disambiguation {
                return Some(message);
            }
            if comment.is_none() && uncommented.is_none() {
                uncommented = Some(message);
            }
        }

        disambiguation.and(uncommented)
    }

    /// Choose the text to show for a message, without substituting.
    ///
    /// A finished translation is used as is, including an intentionally
    /// empty one. Anything else falls back to `source`. For numerus
    /// messages the first form is used.
    pub fn resolve<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
    ) -> Resolved<'a> {
        match self.finished(context, source, disambiguation) {
            Some(TranslationText::Single(text)) => Resolved::translation(text),
            Some(TranslationText::Plural(forms)) if !forms.is_empty() => {
                Resolved::translation(&forms[0])
            }
            _ => {
                debug!(context, source, "No finished translation, using source text");
                Resolved::fallback(source)
            }
        }
    }

    /// Choose the numerus form for `count`, without substituting.
    ///
    /// When the translation has fewer forms than the language rule expects,
    /// the last form is used.
    pub fn resolve_plural<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
        count: i64,
    ) -> Resolved<'a> {
        match self.finished(context, source, disambiguation) {
            Some(TranslationText::Plural(forms)) if !forms.is_empty() => {
                let index = self.plural_rule().form_index(count).min(forms.len() - 1);
                Resolved::translation(&forms[index])
            }
            Some(TranslationText::Single(text)) => Resolved::translation(text),
            _ => {
                debug!(context, source, count, "No finished numerus translation, using source text");
                Resolved::fallback(source)
            }
        }
    }

    /// Translate `source` in `context` and substitute `args`.
    ///
    /// # Errors
    ///
    /// Returns a [`SubstitutionError`] when the chosen text references an
    /// argument that was not supplied. A missing translation is not an error.
    pub fn lookup(&self, context: &str, source: &str, args: &[&str]) -> Result<String, SubstitutionError> {
        self.translate(context, source, None, args)
    }

    /// [`Catalog::lookup`] with a disambiguation comment.
    ///
    /// # Errors
    ///
    /// As [`Catalog::lookup`].
    pub fn translate(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        args: &[&str],
    ) -> Result<String, SubstitutionError> {
        substitute(self.resolve(context, source, disambiguation).text, args)
    }

    /// Translate a numerus message for `count`, replacing `%n` and `args`.
    ///
    /// # Errors
    ///
    /// As [`Catalog::lookup`].
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        count: i64,
        args: &[&str],
    ) -> Result<String, SubstitutionError> {
        let resolved = self.resolve_plural(context, source, disambiguation, count);
        substitute_plural(resolved.text, count, args)
    }

    fn finished(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<&TranslationText> {
        self.find(context, source, disambiguation)
            .map(|message| &message.translation)
            .filter(|translation| translation.is_finished())
            .map(|translation| &translation.text)
    }
}

/// Translate `source` in `context` with `catalog`; see [`Catalog::lookup`].
///
/// # Errors
///
/// As [`Catalog::lookup`].
pub fn lookup(catalog: &Catalog, context: &str, source: &str, args: &[&str]) -> Result<String, SubstitutionError> {
    catalog.lookup(context, source, args)
}

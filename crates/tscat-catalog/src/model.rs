//! In-memory model of a translation catalog

use std::collections::HashMap;

use crate::plural::PluralRule;

/// Default `version` attribute for catalogs built in code
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// Context and message positions sharing one (context name, source) key
type Positions = Vec<(usize, usize)>;

/// An immutable translation catalog
///
/// Built once by the loader (or [`Catalog::new`]) and read-only afterwards.
/// The lookup index is derived from the contexts at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    version: String,
    language: Option<String>,
    source_language: Option<String>,
    contexts: Vec<Context>,
    index: HashMap<String, HashMap<String, Positions>>,
    plural_rule: PluralRule,
}

impl Catalog {
    /// Create a catalog from its parts and build the lookup index
    pub fn new(
        version: impl Into<String>,
        language: Option<String>,
        source_language: Option<String>,
        contexts: Vec<Context>,
    ) -> Self {
        let index = build_index(&contexts);
        let plural_rule = language.as_deref().map(PluralRule::for_tag).unwrap_or_default();
        Self {
            version: version.into(),
            language,
            source_language,
            contexts,
            index,
            plural_rule,
        }
    }

    /// The base catalog: no language and no messages, every lookup falls back
    pub fn empty() -> Self {
        Self::new(DEFAULT_TS_VERSION, None, None, Vec::new())
    }

    /// The `version` attribute of the `TS` root
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Target language, if the resource declares one
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Source language, if the resource declares one
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    /// Plural rule of the target language, resolved once at construction
    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Contexts in document order
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// First context with the given name
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Total number of messages over all contexts
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }

    /// Whether the catalog holds no messages at all
    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    /// All messages for (context, source), in document order
    pub(crate) fn candidates<'a>(
        &'a self,
        context: &str,
        source: &str,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        self.index
            .get(context)
            .and_then(|sources| sources.get(source))
            .into_iter()
            .flatten()
            .map(|&(c, m)| &self.contexts[c].messages[m])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

fn build_index(contexts: &[Context]) -> HashMap<String, HashMap<String, Positions>> {
    let mut index: HashMap<String, HashMap<String, Positions>> = HashMap::new();
    for (c, context) in contexts.iter().enumerate() {
        let sources = index.entry(context.name.clone()).or_default();
        for (m, message) in context.messages.iter().enumerate() {
            sources.entry(message.source.clone()).or_default().push((c, m));
        }
    }
    index
}

/// A named group of messages, usually one screen or component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Context name (class or QML file name)
    pub name: String,
    /// Messages in document order
    pub messages: Vec<Message>,
}

impl Context {
    /// Create a context
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            messages,
        }
    }
}

/// Where a message was extracted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Source file, relative to the `.ts` file
    pub filename: String,
    /// Line number, absent for some generated sources
    pub line: Option<i32>,
}

/// One translatable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Untranslated key text
    pub source: String,
    /// Disambiguation between equal sources in one context
    pub comment: Option<String>,
    /// Previous source text kept by lupdate after the source changed
    pub old_source: Option<String>,
    /// Previous disambiguation comment
    pub old_comment: Option<String>,
    /// Note from the developer to translators
    pub extra_comment: Option<String>,
    /// Note from the translator
    pub translator_comment: Option<String>,
    /// Extraction locations
    pub locations: Vec<Location>,
    /// The translation and its status
    pub translation: Translation,
}

impl Message {
    /// Create a message with no comments or locations
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            source: source.into(),
            comment: None,
            old_source: None,
            old_comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            translation,
        }
    }

    /// Set the disambiguation comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether this message carries plural forms
    pub fn is_numerus(&self) -> bool {
        matches!(self.translation.text, TranslationText::Plural(_))
    }

    /// The disambiguation comment, treating an empty comment as none
    pub fn disambiguation(&self) -> Option<&str> {
        self.comment.as_deref().filter(|comment| !comment.is_empty())
    }
}

/// Review state of a translation, from the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    /// No `type` attribute: the translation is in use
    Finished,
    /// `type="unfinished"`: not yet translated or not yet reviewed
    Unfinished,
    /// `type="vanished"`: the source no longer exists
    Vanished,
    /// `type="obsolete"`: kept from an older source revision
    Obsolete,
}

impl TranslationStatus {
    /// Value of the `type` attribute, `None` for finished translations
    pub fn type_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Parse a `type` attribute value
    pub fn from_type_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }
}

/// Translated text: a single string, or one string per numerus form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationText {
    /// Ordinary message
    Single(String),
    /// Numerus message; may be empty when nothing was translated
    Plural(Vec<String>),
}

/// A translation with its status
///
/// Status and text are independent, so finished-with-text,
/// finished-but-empty and unfinished-without-text stay distinguishable.
/// Unfinished translations may carry draft text that lookups ignore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Review state
    pub status: TranslationStatus,
    /// Text content
    pub text: TranslationText,
}

impl Translation {
    /// A finished single translation
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            text: TranslationText::Single(text.into()),
        }
    }

    /// An unfinished translation with no text
    pub fn unfinished() -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            text: TranslationText::Single(String::new()),
        }
    }

    /// A finished numerus translation
    pub fn finished_plural<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: TranslationStatus::Finished,
            text: TranslationText::Plural(forms.into_iter().map(Into::into).collect()),
        }
    }

    /// An unfinished numerus translation with no forms
    pub fn unfinished_plural() -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            text: TranslationText::Plural(Vec::new()),
        }
    }

    /// Whether lookups may use this translation
    pub fn is_finished(&self) -> bool {
        self.status == TranslationStatus::Finished
    }

    /// Whether there is no text at all (every form empty)
    pub fn is_empty(&self) -> bool {
        match &self.text {
            TranslationText::Single(text) => text.is_empty(),
            TranslationText::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// The single text, `None` for numerus translations
    pub fn text(&self) -> Option<&str> {
        match &self.text {
            TranslationText::Single(text) => Some(text),
            TranslationText::Plural(_) => None,
        }
    }

    /// The numerus forms; a single translation counts as one form
    pub fn forms(&self) -> &[String] {
        match &self.text {
            TranslationText::Single(text) => std::slice::from_ref(text),
            TranslationText::Plural(forms) => forms,
        }
    }
}

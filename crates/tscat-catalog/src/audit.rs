//! Consistency checks and completion statistics

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::model::{Catalog, Context, Message, TranslationStatus};
use crate::placeholder::markers;

/// A problem found by [`audit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A finished translation does not use the same `%N` markers as its source
    PlaceholderMismatch {
        /// Context name
        context: String,
        /// Source text
        source: String,
        /// Numerus form index, for numerus messages
        form: Option<usize>,
        /// Markers in the source but not in the translation
        missing: Vec<u8>,
        /// Markers in the translation but not in the source
        unexpected: Vec<u8>,
    },
    /// A finished numerus translation has the wrong number of forms
    NumerusFormCount {
        /// Context name
        context: String,
        /// Source text
        source: String,
        /// Forms required by the catalog language
        expected: usize,
        /// Forms present
        found: usize,
    },
    /// The same (context, source, comment) appears more than once
    DuplicateMessage {
        /// Context name
        context: String,
        /// Source text
        source: String,
        /// Disambiguation comment
        comment: Option<String>,
    },
    /// The same context name appears more than once
    DuplicateContext {
        /// Context name
        name: String,
    },
}

fn join_markers(indices: &[u8]) -> String {
    indices
        .iter()
        .map(|index| format!("%{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaceholderMismatch {
                context,
                source,
                form,
                missing,
                unexpected,
            } => {
                write!(f, "{context}: \"{source}\"")?;
                if let Some(form) = form {
                    write!(f, " (form {form})")?;
                }
                write!(f, ": placeholder mismatch")?;
                if !missing.is_empty() {
                    write!(f, ", missing {}", join_markers(missing))?;
                }
                if !unexpected.is_empty() {
                    write!(f, ", unexpected {}", join_markers(unexpected))?;
                }
                Ok(())
            }
            Self::NumerusFormCount {
                context,
                source,
                expected,
                found,
            } => write!(
                f,
                "{context}: \"{source}\": {found} numerus forms, language expects {expected}"
            ),
            Self::DuplicateMessage {
                context,
                source,
                comment,
            } => match comment {
                Some(comment) => write!(f, "{context}: \"{source}\" ({comment}): duplicate message"),
                None => write!(f, "{context}: \"{source}\": duplicate message"),
            },
            Self::DuplicateContext { name } => write!(f, "{name}: duplicate context"),
        }
    }
}

/// Check every message of `catalog` and list the problems found
pub fn audit(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut context_names = HashSet::new();
    let mut message_keys = HashSet::new();
    let expected_forms = catalog.language().map(|_| catalog.plural_rule().form_count());

    for context in catalog.contexts() {
        if !context_names.insert(context.name.as_str()) {
            issues.push(Issue::DuplicateContext {
                name: context.name.clone(),
            });
        }

        for message in &context.messages {
            if !message_keys.insert((context.name.as_str(), message.source.as_str(), message.disambiguation())) {
                issues.push(Issue::DuplicateMessage {
                    context: context.name.clone(),
                    source: message.source.clone(),
                    comment: message.disambiguation().map(str::to_string),
                });
            }
            check_message(context, message, expected_forms, &mut issues);
        }
    }

    debug!(issues = issues.len(), "Audited translation catalog");
    issues
}

fn check_message(context: &Context, message: &Message, expected_forms: Option<usize>, issues: &mut Vec<Issue>) {
    let translation = &message.translation;
    if !translation.is_finished() || translation.is_empty() {
        return;
    }

    let source_markers = markers(&message.source);
    let numerus = message.is_numerus();
    let forms = translation.forms();

    if numerus {
        if let Some(expected) = expected_forms.filter(|&expected| expected != forms.len()) {
            issues.push(Issue::NumerusFormCount {
                context: context.name.clone(),
                source: message.source.clone(),
                expected,
                found: forms.len(),
            });
        }
    }

    for (index, form) in forms.iter().enumerate() {
        let form_markers = markers(form);
        if form_markers == source_markers {
            continue;
        }
        issues.push(Issue::PlaceholderMismatch {
            context: context.name.clone(),
            source: message.source.clone(),
            form: numerus.then_some(index),
            missing: difference(&source_markers, &form_markers),
            unexpected: difference(&form_markers, &source_markers),
        });
    }
}

fn difference(left: &BTreeSet<u8>, right: &BTreeSet<u8>) -> Vec<u8> {
    left.difference(right).copied().collect()
}

/// Message counts by translation status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationCounts {
    /// All messages
    pub messages: usize,
    /// Finished translations
    pub finished: usize,
    /// Unfinished translations
    pub unfinished: usize,
    /// Vanished translations
    pub vanished: usize,
    /// Obsolete translations
    pub obsolete: usize,
}

impl TranslationCounts {
    fn record(&mut self, status: TranslationStatus) {
        self.messages += 1;
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Vanished => self.vanished += 1,
            TranslationStatus::Obsolete => self.obsolete += 1,
        }
    }

    fn add(&mut self, other: &Self) {
        self.messages += other.messages;
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.vanished += other.vanished;
        self.obsolete += other.obsolete;
    }

    /// Finished share of the live (finished or unfinished) messages, in percent
    #[allow(clippy::cast_precision_loss)]
    pub fn completion(&self) -> f64 {
        let live = self.finished + self.unfinished;
        if live == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / live as f64
        }
    }
}

/// Counts for one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    /// Context name
    pub name: String,
    /// Counts for this context
    #[serde(flatten)]
    pub counts: TranslationCounts,
}

/// Counts for a whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Target language
    pub language: Option<String>,
    /// Number of contexts
    pub contexts: usize,
    /// Counts over all contexts
    pub totals: TranslationCounts,
    /// Counts per context, in document order
    pub per_context: Vec<ContextStats>,
}

/// Count messages by status, per context and in total
pub fn stats(catalog: &Catalog) -> CatalogStats {
    let mut totals = TranslationCounts::default();
    let per_context: Vec<ContextStats> = catalog
        .contexts()
        .iter()
        .map(|context| {
            let mut counts = TranslationCounts::default();
            for message in &context.messages {
                counts.record(message.translation.status);
            }
            totals.add(&counts);
            ContextStats {
                name: context.name.clone(),
                counts,
            }
        })
        .collect();

    CatalogStats {
        language: catalog.language().map(str::to_string),
        contexts: per_context.len(),
        totals,
        per_context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Translation;

    fn catalog(contexts: Vec<Context>) -> Catalog {
        Catalog::new("2.1", Some("lt".to_string()), None, contexts)
    }

    #[test]
    fn test_clean_catalog_has_no_issues() {
        let catalog = catalog(vec![Context::new(
            "About",
            vec![
                Message::new("QField Settings folder: %1", Translation::finished("QField nustatymų katalogas: %1")),
                Message::new("QField Version: %1 (%2)", Translation::unfinished()),
            ],
        )]);
        assert!(audit(&catalog).is_empty());
    }

    #[test]
    fn test_placeholder_mismatch() {
        let catalog = catalog(vec![Context::new(
            "QgsQuickUtils",
            vec![Message::new("screen DPI: %1x%2", Translation::finished("ekrano DPI: %1x%3"))],
        )]);
        let issues = audit(&catalog);
        assert_eq!(
            issues,
            vec![Issue::PlaceholderMismatch {
                context: "QgsQuickUtils".to_string(),
                source: "screen DPI: %1x%2".to_string(),
                form: None,
                missing: vec![2],
                unexpected: vec![3],
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "QgsQuickUtils: \"screen DPI: %1x%2\": placeholder mismatch, missing %2, unexpected %3"
        );
    }

    #[test]
    fn test_numerus_form_count() {
        let catalog = catalog(vec![Context::new(
            "Sync",
            vec![Message::new("%n file(s)", Translation::finished_plural(["%n failas", "%n failai"]))],
        )]);
        let issues = audit(&catalog);
        assert_eq!(
            issues,
            vec![Issue::NumerusFormCount {
                context: "Sync".to_string(),
                source: "%n file(s)".to_string(),
                expected: 3,
                found: 2,
            }]
        );
    }

    #[test]
    fn test_duplicates() {
        let catalog = catalog(vec![
            Context::new("A", vec![Message::new("x", Translation::unfinished())]),
            Context::new(
                "A",
                vec![
                    Message::new("x", Translation::unfinished()),
                    Message::new("x", Translation::unfinished()).with_comment("other"),
                ],
            ),
        ]);
        let issues = audit(&catalog);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&Issue::DuplicateContext { name: "A".to_string() }));
        assert!(matches!(&issues[1], Issue::DuplicateMessage { comment: None, .. }));
    }

    #[test]
    fn test_stats() {
        let mut vanished = Translation::finished("Senas");
        vanished.status = TranslationStatus::Vanished;
        let catalog = catalog(vec![
            Context::new(
                "A",
                vec![
                    Message::new("x", Translation::finished("X")),
                    Message::new("y", Translation::unfinished()),
                ],
            ),
            Context::new("B", vec![Message::new("z", vanished)]),
        ]);

        let stats = stats(&catalog);
        assert_eq!(stats.contexts, 2);
        assert_eq!(stats.totals.messages, 3);
        assert_eq!(stats.totals.finished, 1);
        assert_eq!(stats.totals.vanished, 1);
        assert!((stats.totals.completion() - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.per_context[1].counts.vanished, 1);
    }
}

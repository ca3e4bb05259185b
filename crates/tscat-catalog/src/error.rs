//! Error types for catalog operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a `.ts` resource
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document is not well-formed XML
    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset where the reader stopped
        position: u64,
        /// Underlying reader error
        #[source]
        source: quick_xml::Error,
    },

    /// The resource is not valid UTF-8
    #[error("Invalid UTF-8 at byte {position}")]
    Encoding {
        /// Offset of the first invalid byte
        position: u64,
    },

    /// The root element is not `<TS>`
    #[error("Expected root element <TS>, found <{found}>")]
    UnexpectedRoot {
        /// Name of the element found instead
        found: String,
    },

    /// An element that the format does not allow at this place
    #[error("Unexpected element <{found}> inside <{parent}> at byte {position}")]
    UnexpectedElement {
        /// Enclosing element
        parent: String,
        /// Offending element
        found: String,
        /// Byte offset after the offending tag
        position: u64,
    },

    /// Non-whitespace text between structural elements
    #[error("Unexpected text inside <{parent}> at byte {position}")]
    UnexpectedText {
        /// Enclosing element
        parent: String,
        /// Byte offset after the text
        position: u64,
    },

    /// A closing tag with no matching element at this level
    #[error("Unbalanced closing tag inside <{parent}> at byte {position}")]
    UnbalancedTag {
        /// Enclosing element
        parent: String,
        /// Byte offset after the tag
        position: u64,
    },

    /// A required child element is absent
    #[error("Missing <{element}> in <{parent}> ending at byte {position}")]
    MissingElement {
        /// The required element
        element: String,
        /// Enclosing element
        parent: String,
        /// Byte offset of the enclosing element's end
        position: u64,
    },

    /// A child element that may appear only once appeared twice
    #[error("Duplicate <{element}> in <{parent}> at byte {position}")]
    DuplicateElement {
        /// The repeated element
        element: String,
        /// Enclosing element
        parent: String,
        /// Byte offset after the second occurrence
        position: u64,
    },

    /// A required attribute is absent
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element carrying the attribute
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// An attribute value outside the allowed set
    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        /// Element carrying the attribute
        element: String,
        /// Attribute name
        attribute: String,
        /// Rejected value
        value: String,
    },

    /// The document ended inside an open element
    #[error("Document ended before </{element}>")]
    UnexpectedEof {
        /// Element left open
        element: String,
    },

    /// A context without any message
    #[error("Context '{name}' has no messages")]
    EmptyContext {
        /// Context name
        name: String,
    },

    /// Reading the resource from disk failed
    #[error("Failed to read resource file {}: {source}", .path.display())]
    Io {
        /// Path of the resource
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while substituting placeholder markers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    /// A `%N` marker references an argument that was not supplied
    #[error("Placeholder %{index} has no argument ({supplied} supplied)")]
    MissingArgument {
        /// Marker index, 1-based
        index: u8,
        /// Number of arguments passed
        supplied: usize,
    },
}

/// Errors raised while switching the published locale
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// The language tag could not be parsed
    #[error("Invalid language identifier '{tag}': {source}")]
    InvalidLanguage {
        /// Tag as given by the caller
        tag: String,
        /// Parser error
        #[source]
        source: unic_langid::LanguageIdentifierError,
    },

    /// None of the candidate files exist
    #[error("No translation resource for '{language}' (tried {})", join_paths(.candidates))]
    ResourceNotFound {
        /// Requested language
        language: String,
        /// Paths probed, in order
        candidates: Vec<PathBuf>,
    },

    /// The located resource failed to load
    #[error("Failed to load translation resource {}: {source}", .path.display())]
    Load {
        /// Path of the resource
        path: PathBuf,
        /// Loader error
        #[source]
        source: ParseError,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| Path::display(path).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

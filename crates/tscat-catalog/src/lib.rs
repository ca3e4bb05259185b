//! # tscat Catalog
//!
//! Loading, lookup and auditing of Qt Linguist `.ts` translation catalogs.
//!
//! A catalog is parsed once, then shared read-only. Lookups return the
//! finished translation when there is one and fall back to the source text
//! otherwise; positional `%1`..`%99` markers are substituted in both cases.
//!
//! - Catalog model with the finished / unfinished / empty distinction
//! - Strict loader built on `quick-xml`
//! - Lookup with disambiguation comments and numerus (plural) forms
//! - Serializer producing lupdate-style XML
//! - Audit of placeholder consistency and numerus form counts
//! - [`Translator`] for atomically switching the published locale
//!
//! # Example
//!
//! ```rust
//! use tscat_catalog::load;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = load(r#"<TS version="2.1" language="lt">
//! <context>
//!     <name>DateTime</name>
//!     <message>
//!         <source>Ok</source>
//!         <translation>Gerai</translation>
//!     </message>
//! </context>
//! </TS>"#)?;
//!
//! assert_eq!(catalog.lookup("DateTime", "Ok", &[])?, "Gerai");
//! assert_eq!(catalog.lookup("DateTime", "Cancel", &[])?, "Cancel");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod error;
pub mod lookup;
pub mod model;
pub mod parser;
pub mod placeholder;
pub mod plural;
pub mod translator;
pub mod writer;

pub use audit::{audit, stats, CatalogStats, ContextStats, Issue, TranslationCounts};
pub use error::{ParseError, SubstitutionError, TranslatorError};
pub use lookup::{lookup, Origin, Resolved};
pub use model::{Catalog, Context, Location, Message, Translation, TranslationStatus, TranslationText};
pub use parser::{load, load_bytes, load_file};
pub use placeholder::{markers, substitute, substitute_plural};
pub use plural::PluralRule;
pub use translator::{parse_language, ResourceLocator, Translator};
pub use writer::TsWriter;

// Re-export the language identifier used by the locale switching API
pub use unic_langid::LanguageIdentifier;

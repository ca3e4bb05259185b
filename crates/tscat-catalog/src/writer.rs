//! Serializer producing lupdate-style `.ts` XML

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use quick_xml::escape::escape;
use tracing::{debug, info};

use crate::model::{Catalog, Message, TranslationText};

const INDENT_MESSAGE: &str = "    ";
const INDENT_CHILD: &str = "        ";
const INDENT_FORM: &str = "            ";

/// Display adapter writing a catalog as a `.ts` document
///
/// Every text and attribute value is escaped, so loading the output gives
/// back an equal catalog. Contexts without messages are left out, since
/// the loader rejects them.
#[derive(Debug, Clone, Copy)]
pub struct TsWriter<'a> {
    catalog: &'a Catalog,
}

impl<'a> TsWriter<'a> {
    /// Wrap a catalog for writing
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    fn write_message(f: &mut fmt::Formatter<'_>, message: &Message) -> fmt::Result {
        if message.is_numerus() {
            writeln!(f, "{INDENT_MESSAGE}<message numerus=\"yes\">")?;
        } else {
            writeln!(f, "{INDENT_MESSAGE}<message>")?;
        }

        for location in &message.locations {
            write!(f, "{INDENT_CHILD}<location filename=\"{}\"", escape(location.filename.as_str()))?;
            if let Some(line) = location.line {
                write!(f, " line=\"{line}\"")?;
            }
            writeln!(f, "/>")?;
        }

        write_element(f, "source", &message.source)?;
        let optional = [
            ("oldsource", &message.old_source),
            ("comment", &message.comment),
            ("oldcomment", &message.old_comment),
            ("extracomment", &message.extra_comment),
            ("translatorcomment", &message.translator_comment),
        ];
        for (element, value) in optional {
            if let Some(value) = value {
                write_element(f, element, value)?;
            }
        }

        let translation = &message.translation;
        write!(f, "{INDENT_CHILD}<translation")?;
        if let Some(kind) = translation.status.type_attribute() {
            write!(f, " type=\"{kind}\"")?;
        }
        match &translation.text {
            TranslationText::Single(text) if text.is_empty() => writeln!(f, "/>")?,
            TranslationText::Single(text) => writeln!(f, ">{}</translation>", escape(text.as_str()))?,
            TranslationText::Plural(forms) if forms.is_empty() => writeln!(f, "/>")?,
            TranslationText::Plural(forms) => {
                writeln!(f, ">")?;
                for form in forms {
                    writeln!(f, "{INDENT_FORM}<numerusform>{}</numerusform>", escape(form.as_str()))?;
                }
                writeln!(f, "{INDENT_CHILD}</translation>")?;
            }
        }

        writeln!(f, "{INDENT_MESSAGE}</message>")
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &str, text: &str) -> fmt::Result {
    writeln!(f, "{INDENT_CHILD}<{element}>{}</{element}>", escape(text))
}

impl fmt::Display for TsWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.catalog;
        writeln!(f, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        writeln!(f, "<!DOCTYPE TS>")?;

        write!(f, "<TS version=\"{}\"", escape(catalog.version()))?;
        if let Some(language) = catalog.language() {
            write!(f, " language=\"{}\"", escape(language))?;
        }
        if let Some(source_language) = catalog.source_language() {
            write!(f, " sourcelanguage=\"{}\"", escape(source_language))?;
        }
        writeln!(f, ">")?;

        for context in catalog.contexts().iter().filter(|context| !context.messages.is_empty()) {
            writeln!(f, "<context>")?;
            writeln!(f, "{INDENT_MESSAGE}<name>{}</name>", escape(context.name.as_str()))?;
            for message in &context.messages {
                Self::write_message(f, message)?;
            }
            writeln!(f, "</context>")?;
        }

        writeln!(f, "</TS>")
    }
}

impl Catalog {
    /// Serialize to a `.ts` document
    pub fn to_ts_string(&self) -> String {
        for context in self.contexts().iter().filter(|context| context.messages.is_empty()) {
            debug!("Skipping context '{}' without messages", context.name);
        }
        TsWriter::new(self).to_string()
    }

    /// Serialize and write to `path`
    ///
    /// # Errors
    ///
    /// Returns the I/O error from writing the file.
    pub fn write_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_ts_string())?;
        info!("Wrote {} messages to {:?}", self.message_count(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Location, Translation};

    #[test]
    fn test_layout() {
        let mut message = Message::new("Add feature on <i>%1</i>", Translation::unfinished());
        message.locations.push(Location {
            filename: "../src/qml/FeatureForm.qml".to_string(),
            line: Some(42),
        });
        let catalog = Catalog::new(
            "2.1",
            Some("lt".to_string()),
            None,
            vec![Context::new("FeatureForm", vec![message])],
        );

        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<!DOCTYPE TS>\n",
            "<TS version=\"2.1\" language=\"lt\">\n",
            "<context>\n",
            "    <name>FeatureForm</name>\n",
            "    <message>\n",
            "        <location filename=\"../src/qml/FeatureForm.qml\" line=\"42\"/>\n",
            "        <source>Add feature on &lt;i&gt;%1&lt;/i&gt;</source>\n",
            "        <translation type=\"unfinished\"/>\n",
            "    </message>\n",
            "</context>\n",
            "</TS>\n",
        );
        assert_eq!(catalog.to_ts_string(), expected);
    }

    #[test]
    fn test_numerus_layout() {
        let message = Message::new("%n file(s)", Translation::finished_plural(["%n failas", "%n failai"]));
        let catalog = Catalog::new("2.1", None, None, vec![Context::new("C", vec![message])]);
        let output = catalog.to_ts_string();

        assert!(output.contains("    <message numerus=\"yes\">\n"));
        assert!(output.contains("            <numerusform>%n failas</numerusform>\n"));
        assert!(!output.contains("language="));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let message = Message::new("Log", Translation::finished("Log'as \"x\""));
        let catalog = Catalog::new("2.1", None, None, vec![Context::new("C", vec![message])]);
        assert!(catalog
            .to_ts_string()
            .contains("<translation>Log&apos;as &quot;x&quot;</translation>"));
    }

    #[test]
    fn test_empty_context_is_not_written() {
        let catalog = Catalog::new(
            "2.1",
            None,
            None,
            vec![
                Context::new("Empty", vec![]),
                Context::new("C", vec![Message::new("x", Translation::finished("y"))]),
            ],
        );
        let output = catalog.to_ts_string();
        assert!(!output.contains("<name>Empty</name>"));

        let reloaded = crate::parser::load(&output).unwrap();
        assert_eq!(reloaded.contexts().len(), 1);
        assert_eq!(reloaded.contexts()[0].name, "C");
        assert_eq!(reloaded.lookup("C", "x", &[]).unwrap(), "y");
    }
}

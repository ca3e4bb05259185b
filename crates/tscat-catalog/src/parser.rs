//! Loader for the `.ts` XML format
//!
//! The loader is strict: any element the format does not define, stray text
//! between elements, or a missing `name`/`source`/`translation` is a
//! [`ParseError`]. Entities are decoded, so `&lt;i&gt;` in the file becomes
//! `<i>` in the model and stays that way through lookup.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::model::{Catalog, Context, Location, Message, Translation, TranslationStatus, TranslationText};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a `.ts` document into a [`Catalog`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is not well-formed or does not
/// follow the `TS` / `context` / `message` structure.
pub fn load(resource: &str) -> Result<Catalog, ParseError> {
    let resource = resource.strip_prefix('\u{feff}').unwrap_or(resource);
    let catalog = TsParser::new(resource).parse_document()?;
    debug!(
        language = catalog.language().unwrap_or("-"),
        contexts = catalog.contexts().len(),
        messages = catalog.message_count(),
        "Parsed translation catalog"
    );
    Ok(catalog)
}

/// Parse raw bytes, skipping a UTF-8 byte order mark.
///
/// # Errors
///
/// Returns [`ParseError::Encoding`] for invalid UTF-8, otherwise as [`load`].
pub fn load_bytes(bytes: &[u8]) -> Result<Catalog, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        position: e.valid_up_to() as u64,
    })?;
    load(text)
}

/// Read and parse a `.ts` file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] when the file cannot be read, otherwise as
/// [`load_bytes`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, ParseError> {
    let path = path.as_ref();
    debug!("Loading translation resource: {:?}", path);

    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = load_bytes(&bytes)?;

    info!(
        "Loaded {} messages from {:?}",
        catalog.message_count(),
        path
    );
    Ok(catalog)
}

/// One step of the document as the structural parser sees it
enum Node<'a> {
    Start(BytesStart<'a>),
    End,
    Text(Cow<'a, str>),
    Eof,
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    /// Set after an empty element so the next node is its synthetic end
    pending_end: bool,
}

impl<'a> TsParser<'a> {
    fn new(resource: &'a str) -> Self {
        Self {
            reader: Reader::from_str(resource),
            pending_end: false,
        }
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn next_node(&mut self) -> Result<Node<'a>, ParseError> {
        if self.pending_end {
            self.pending_end = false;
            return Ok(Node::End);
        }

        loop {
            let event = self.reader.read_event().map_err(|source| ParseError::Xml {
                position: self.position(),
                source,
            })?;

            match event {
                Event::Start(start) => return Ok(Node::Start(start)),
                Event::Empty(start) => {
                    self.pending_end = true;
                    return Ok(Node::Start(start));
                }
                Event::End(_) => return Ok(Node::End),
                Event::Text(text) => {
                    let text = text.unescape().map_err(|source| ParseError::Xml {
                        position: self.position(),
                        source,
                    })?;
                    return Ok(Node::Text(text));
                }
                Event::CData(data) => {
                    let text = match data.into_inner() {
                        Cow::Borrowed(bytes) => Cow::Borrowed(
                            std::str::from_utf8(bytes).map_err(|_| self.encoding_error())?,
                        ),
                        Cow::Owned(bytes) => Cow::Owned(
                            String::from_utf8(bytes).map_err(|_| self.encoding_error())?,
                        ),
                    };
                    return Ok(Node::Text(text));
                }
                Event::Eof => return Ok(Node::Eof),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
    }

    fn encoding_error(&self) -> ParseError {
        ParseError::Encoding {
            position: self.position(),
        }
    }

    fn parse_document(&mut self) -> Result<Catalog, ParseError> {
        let root = loop {
            match self.next_node()? {
                Node::Start(start) => break start,
                Node::Text(text) => self.whitespace_only(&text, "document")?,
                Node::End => return Err(self.unbalanced("document")),
                Node::Eof => {
                    return Err(ParseError::MissingElement {
                        element: "TS".to_string(),
                        parent: "document".to_string(),
                        position: self.position(),
                    })
                }
            }
        };

        let root_name = element_name(&root);
        if root_name != "TS" {
            return Err(ParseError::UnexpectedRoot { found: root_name });
        }

        let mut version = None;
        let mut language = None;
        let mut source_language = None;
        for (key, value) in self.attributes(&root)? {
            match key.as_str() {
                "version" => version = Some(value),
                "language" => language = Some(value),
                "sourcelanguage" => source_language = Some(value),
                _ => {}
            }
        }
        let version = version.ok_or_else(|| ParseError::MissingAttribute {
            element: "TS".to_string(),
            attribute: "version".to_string(),
        })?;

        let mut contexts = Vec::new();
        loop {
            match self.next_node()? {
                Node::Start(start) => {
                    let name = element_name(&start);
                    if name == "context" {
                        contexts.push(self.parse_context()?);
                    } else {
                        return Err(self.unexpected_element("TS", name));
                    }
                }
                Node::Text(text) => self.whitespace_only(&text, "TS")?,
                Node::End => break,
                Node::Eof => return Err(unexpected_eof("TS")),
            }
        }

        loop {
            match self.next_node()? {
                Node::Eof => break,
                Node::Text(text) => self.whitespace_only(&text, "document")?,
                Node::Start(start) => {
                    return Err(self.unexpected_element("document", element_name(&start)))
                }
                Node::End => return Err(self.unbalanced("document")),
            }
        }

        Ok(Catalog::new(version, language, source_language, contexts))
    }

    fn parse_context(&mut self) -> Result<Context, ParseError> {
        let mut name = None;
        let mut messages = Vec::new();

        loop {
            match self.next_node()? {
                Node::Start(start) => match element_name(&start).as_str() {
                    "name" => {
                        let text = self.read_text("name")?;
                        self.set_once(&mut name, text, "name", "context")?;
                    }
                    "message" => messages.push(self.parse_message(&start)?),
                    other => return Err(self.unexpected_element("context", other.to_string())),
                },
                Node::Text(text) => self.whitespace_only(&text, "context")?,
                Node::End => break,
                Node::Eof => return Err(unexpected_eof("context")),
            }
        }

        let name = name.ok_or_else(|| self.missing("name", "context"))?;
        if messages.is_empty() {
            return Err(ParseError::EmptyContext { name });
        }
        Ok(Context::new(name, messages))
    }

    fn parse_message(&mut self, start: &BytesStart<'_>) -> Result<Message, ParseError> {
        let mut numerus = false;
        for (key, value) in self.attributes(start)? {
            if key == "numerus" {
                numerus = match value.as_str() {
                    "yes" => true,
                    "no" => false,
                    _ => return Err(invalid_attribute("message", "numerus", value)),
                };
            }
        }

        let mut source = None;
        let mut comment = None;
        let mut old_source = None;
        let mut old_comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();
        let mut translation = None;

        loop {
            match self.next_node()? {
                Node::Start(child) => match element_name(&child).as_str() {
                    "location" => locations.push(self.parse_location(&child)?),
                    "source" => {
                        let text = self.read_text("source")?;
                        self.set_once(&mut source, text, "source", "message")?;
                    }
                    "comment" => {
                        let text = self.read_text("comment")?;
                        self.set_once(&mut comment, text, "comment", "message")?;
                    }
                    "oldsource" => {
                        let text = self.read_text("oldsource")?;
                        self.set_once(&mut old_source, text, "oldsource", "message")?;
                    }
                    "oldcomment" => {
                        let text = self.read_text("oldcomment")?;
                        self.set_once(&mut old_comment, text, "oldcomment", "message")?;
                    }
                    "extracomment" => {
                        let text = self.read_text("extracomment")?;
                        self.set_once(&mut extra_comment, text, "extracomment", "message")?;
                    }
                    "translatorcomment" => {
                        let text = self.read_text("translatorcomment")?;
                        self.set_once(
                            &mut translator_comment,
                            text,
                            "translatorcomment",
                            "message",
                        )?;
                    }
                    "translation" => {
                        let parsed = self.parse_translation(&child, numerus)?;
                        self.set_once(&mut translation, parsed, "translation", "message")?;
                    }
                    other => return Err(self.unexpected_element("message", other.to_string())),
                },
                Node::Text(text) => self.whitespace_only(&text, "message")?,
                Node::End => break,
                Node::Eof => return Err(unexpected_eof("message")),
            }
        }

        Ok(Message {
            source: source.ok_or_else(|| self.missing("source", "message"))?,
            comment,
            old_source,
            old_comment,
            extra_comment,
            translator_comment,
            locations,
            translation: translation.ok_or_else(|| self.missing("translation", "message"))?,
        })
    }

    fn parse_location(&mut self, start: &BytesStart<'_>) -> Result<Location, ParseError> {
        let mut filename = None;
        let mut line = None;
        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "filename" => filename = Some(value),
                "line" => {
                    line = Some(
                        value
                            .parse::<i32>()
                            .map_err(|_| invalid_attribute("location", "line", value.clone()))?,
                    );
                }
                _ => {}
            }
        }
        self.expect_end("location")?;

        let filename = filename.ok_or_else(|| ParseError::MissingAttribute {
            element: "location".to_string(),
            attribute: "filename".to_string(),
        })?;
        Ok(Location { filename, line })
    }

    fn parse_translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
    ) -> Result<Translation, ParseError> {
        let mut status = TranslationStatus::Finished;
        for (key, value) in self.attributes(start)? {
            if key == "type" {
                status = TranslationStatus::from_type_attribute(&value)
                    .ok_or_else(|| invalid_attribute("translation", "type", value))?;
            }
        }

        let text = if numerus {
            let mut forms = Vec::new();
            loop {
                match self.next_node()? {
                    Node::Start(child) => {
                        let name = element_name(&child);
                        if name == "numerusform" {
                            forms.push(self.read_text("numerusform")?);
                        } else {
                            return Err(self.unexpected_element("translation", name));
                        }
                    }
                    Node::Text(text) => self.whitespace_only(&text, "translation")?,
                    Node::End => break,
                    Node::Eof => return Err(unexpected_eof("translation")),
                }
            }
            TranslationText::Plural(forms)
        } else {
            TranslationText::Single(self.read_text("translation")?)
        };

        Ok(Translation { status, text })
    }

    /// Collect the text of a leaf element up to its closing tag
    fn read_text(&mut self, element: &str) -> Result<String, ParseError> {
        let mut buffer = String::new();
        loop {
            match self.next_node()? {
                Node::Text(text) => buffer.push_str(&text),
                Node::Start(child) => {
                    return Err(self.unexpected_element(element, element_name(&child)))
                }
                Node::End => return Ok(buffer),
                Node::Eof => return Err(unexpected_eof(element)),
            }
        }
    }

    fn expect_end(&mut self, element: &str) -> Result<(), ParseError> {
        loop {
            match self.next_node()? {
                Node::Text(text) => self.whitespace_only(&text, element)?,
                Node::Start(child) => {
                    return Err(self.unexpected_element(element, element_name(&child)))
                }
                Node::End => return Ok(()),
                Node::Eof => return Err(unexpected_eof(element)),
            }
        }
    }

    fn attributes(&self, start: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
        start
            .attributes()
            .map(|attribute| {
                let attribute = attribute.map_err(|err| ParseError::Xml {
                    position: self.position(),
                    source: err.into(),
                })?;
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let value = attribute
                    .unescape_value()
                    .map_err(|source| ParseError::Xml {
                        position: self.position(),
                        source,
                    })?
                    .into_owned();
                Ok((key, value))
            })
            .collect()
    }

    fn set_once<T>(
        &self,
        slot: &mut Option<T>,
        value: T,
        element: &str,
        parent: &str,
    ) -> Result<(), ParseError> {
        if slot.is_some() {
            return Err(ParseError::DuplicateElement {
                element: element.to_string(),
                parent: parent.to_string(),
                position: self.position(),
            });
        }
        *slot = Some(value);
        Ok(())
    }

    fn whitespace_only(&self, text: &str, parent: &str) -> Result<(), ParseError> {
        if text.trim().is_empty() {
            Ok(())
        } else {
            Err(ParseError::UnexpectedText {
                parent: parent.to_string(),
                position: self.position(),
            })
        }
    }

    fn unexpected_element(&self, parent: &str, found: String) -> ParseError {
        ParseError::UnexpectedElement {
            parent: parent.to_string(),
            found,
            position: self.position(),
        }
    }

    fn unbalanced(&self, parent: &str) -> ParseError {
        ParseError::UnbalancedTag {
            parent: parent.to_string(),
            position: self.position(),
        }
    }

    fn missing(&self, element: &str, parent: &str) -> ParseError {
        ParseError::MissingElement {
            element: element.to_string(),
            parent: parent.to_string(),
            position: self.position(),
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn unexpected_eof(element: &str) -> ParseError {
    ParseError::UnexpectedEof {
        element: element.to_string(),
    }
}

fn invalid_attribute(element: &str, attribute: &str, value: String) -> ParseError {
    ParseError::InvalidAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(r#"<?xml version="1.0" ?><!DOCTYPE TS><TS language="lt" version="2.0">{body}</TS>"#)
    }

    #[test]
    fn test_minimal_document() {
        let catalog = load(&wrap(
            "<context><name>DateTime</name><message><source>Ok</source><translation>Gerai</translation></message></context>",
        ))
        .unwrap();

        assert_eq!(catalog.version(), "2.0");
        assert_eq!(catalog.language(), Some("lt"));
        let message = &catalog.contexts()[0].messages[0];
        assert_eq!(message.source, "Ok");
        assert_eq!(message.translation, Translation::finished("Gerai"));
    }

    #[test]
    fn test_empty_element_forms() {
        let catalog = load(&wrap(
            r#"<context><name>A</name>
            <message><source>x</source><translation type="unfinished"/></message>
            <message><source>y</source><translation></translation></message>
            <message><source>z</source><translation/></message>
            </context>"#,
        ))
        .unwrap();

        let messages = &catalog.contexts()[0].messages;
        assert_eq!(messages[0].translation, Translation::unfinished());
        assert_eq!(messages[1].translation, Translation::finished(""));
        assert_eq!(messages[2].translation, Translation::finished(""));
    }

    #[test]
    fn test_cdata_is_text() {
        let catalog = load(&wrap(
            "<context><name>A</name><message><source><![CDATA[a <b> & c]]></source><translation type=\"unfinished\"/></message></context>",
        ))
        .unwrap();
        assert_eq!(catalog.contexts()[0].messages[0].source, "a <b> & c");
    }

    #[test]
    fn test_bom_is_skipped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(
            wrap("<context><name>A</name><message><source>x</source><translation>y</translation></message></context>")
                .as_bytes(),
        );
        assert!(load_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = load_bytes(b"<TS version=\"2.1\">\xFF</TS>").unwrap_err();
        assert!(matches!(err, ParseError::Encoding { position: 18 }));
    }

    #[test]
    fn test_wrong_root() {
        let err = load("<XLIFF version=\"1.2\"/>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { found } if found == "XLIFF"));
    }

    #[test]
    fn test_location_line_must_be_numeric() {
        let err = load(&wrap(
            r#"<context><name>A</name><message><location filename="a.qml" line="x"/><source>s</source><translation>t</translation></message></context>"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { attribute, .. } if attribute == "line"));
    }
}

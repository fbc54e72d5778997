//! XML writing utilities for SpreadsheetML parts
//! Provides an XML writer wrapper and helpers for the text rules spreadsheet readers expect

use crate::error::OcrSheetError;
use once_cell::sync::Lazy;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Writer;
use regex::Regex;
use std::borrow::Cow;
use std::io::Write;

/// Matches text that an OOXML reader would decode as an `_xHHHH_` escape.
static ESCAPE_LIKE_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(x[0-9A-Fa-f]{4}_)").expect("Hardcode regex pattern")
});

/// XML writer wrapper producing compact, UTF-8 declared documents
pub(crate) struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new XML writer without indentation
    pub(crate) fn new(inner: W) -> XmlWriter<W> {
        XmlWriter { writer: Writer::new(inner) }
    }

    /// Writes the standalone UTF-8 XML declaration
    pub(crate) fn declaration(&mut self) -> Result<(), OcrSheetError> {
        self.writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(())
    }

    /// Writes an element with attributes and the content produced by `inner`
    pub(crate) fn element<F>(&mut self, name: &str, attributes: &[(&str, &str)], inner: F) -> Result<(), OcrSheetError>
    where
        F: FnOnce(&mut Self) -> Result<(), OcrSheetError>,
    {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        inner(self)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes a self-closing element
    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), OcrSheetError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Writes escaped character data
    pub(crate) fn text(&mut self, text: &str) -> Result<(), OcrSheetError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Writes an element holding only text
    pub(crate) fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<(), OcrSheetError> {
        self.element(name, attributes, |writer| writer.text(text))
    }
}

/// Returns true when a character can appear in an XML 1.0 document
pub(crate) fn is_xml_char(character: char) -> bool {
    matches!(character,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Returns true when text must carry `xml:space="preserve"` to survive a reader
pub(crate) fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains(['\n', '\t'])
}

/// Escapes text for a SpreadsheetML string item.
///
/// Readers decode `_xHHHH_` sequences and normalize carriage returns, so a
/// literal underscore escape is protected with `_x005F_`, while CR and every
/// character XML cannot carry are written as `_xHHHH_`.
pub(crate) fn escape_ooxml_string(text: &str) -> Cow<'_, str> {
    let escaped = ESCAPE_LIKE_SEQUENCE.replace_all(text, "_x005F_$1");
    if escaped.chars().all(is_storable_char) {
        return escaped;
    }
    let mut output = String::with_capacity(escaped.len() + 16);
    for character in escaped.chars() {
        if is_storable_char(character) {
            output.push(character);
        } else {
            output.push_str(&format!("_x{:04X}_", character as u32));
        }
    }
    Cow::Owned(output)
}

/// Characters written as-is inside a string item
fn is_storable_char(character: char) -> bool {
    character != '\r' && is_xml_char(character)
}

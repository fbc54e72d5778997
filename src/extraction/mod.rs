//! # Extraction Module
//!
//! In-memory representation of what the document-understanding service
//! returned for one upload, and the seam through which that service is called.
//!
//! - [`ExtractionResult`]: recognized plain text, or form fields plus tables
//! - [`classify`]: chooses between plain OCR and form parsing for an upload
//! - [`document`]: the upload and the raw service response
//! - [`processor`]: the injected service client and the [`processor::Extractor`]

pub mod classify;
pub mod document;
pub mod processor;

/// Literal written in place of an unset field name or value.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Result of extracting one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Text recognized by plain OCR
    PlainText { text: String },
    /// Field/value pairs and tables found by form parsing
    FormResult { fields: FormFields, tables: Vec<Table> },
}

impl ExtractionResult {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn form(fields: FormFields, tables: Vec<Table>) -> Self {
        Self::FormResult { fields, tables }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Self::FormResult { .. })
    }
}

/// Ordered mapping of field names to field values.
///
/// Inserting a name that is already present replaces its value and keeps the
/// position of the first insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Inserts a field whose name or value may be unset; unset parts become [`UNKNOWN_PLACEHOLDER`].
    pub fn insert_entity(&mut self, name: Option<&str>, value: Option<&str>) {
        self.insert(
            name.unwrap_or(UNKNOWN_PLACEHOLDER),
            value.unwrap_or(UNKNOWN_PLACEHOLDER),
        );
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// A detected table: header rows first, then body rows.
/// Rows are independent and may differ in length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R, S> FromIterator<R> for Table
where
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Table::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

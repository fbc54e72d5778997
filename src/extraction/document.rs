//! Uploaded documents and the raw shape of the service response.

use crate::error::OcrSheetError;
use crate::extraction::classify::ProcessorKind;
use crate::extraction::ExtractionResult;
use crate::extraction::FormFields;
use crate::extraction::Table;
use std::path::Path;

/// Upload types the service accepts, by file extension.
const SUPPORTED_TYPES: [(&str, &str); 4] = [
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// A single uploaded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl RawDocument {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Creates a document, deriving its MIME type from the file extension.
    pub fn from_file(file_name: impl Into<String>, content: Vec<u8>) -> Result<Self, OcrSheetError> {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name)
            .ok_or_else(|| OcrSheetError::UnsupportedDocument(file_name.clone()))?;
        Ok(Self::new(file_name, mime_type, content))
    }
}

/// Returns the MIME type of a supported upload (PDF, PNG, JPEG), by extension.
pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == extension)
        .map(|(_, mime_type)| *mime_type)
}

/// A recognized document as returned by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// Full recognized text
    pub text: String,
    /// Key/value entities found by form parsing
    pub entities: Vec<Entity>,
    pub pages: Vec<Page>,
}

/// A key/value entity; either side may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    pub field_name: Option<String>,
    pub field_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub tables: Vec<DetectedTable>,
}

/// A table as laid out on a page, cells already decoded to text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectedTable {
    pub header_rows: Vec<Vec<String>>,
    pub body_rows: Vec<Vec<String>>,
}

impl ProcessedDocument {
    fn table_count(&self) -> usize {
        self.pages.iter().map(|page| page.tables.len()).sum()
    }

    /// Shapes the response of a processor of the given kind into an [`ExtractionResult`].
    ///
    /// An OCR response must not carry entities or tables.
    pub fn into_result(self, kind: ProcessorKind) -> Result<ExtractionResult, OcrSheetError> {
        match kind {
            ProcessorKind::Ocr if !self.entities.is_empty() || self.table_count() > 0 => {
                Err(OcrSheetError::MalformedResultError(format!(
                    "OCR response carries {} entities and {} tables",
                    self.entities.len(),
                    self.table_count()
                )))
            }
            ProcessorKind::Ocr => Ok(ExtractionResult::plain_text(self.text)),
            ProcessorKind::FormParser => {
                let mut fields = FormFields::new();
                for entity in &self.entities {
                    fields.insert_entity(entity.field_name.as_deref(), entity.field_value.as_deref());
                }
                let tables = self
                    .pages
                    .into_iter()
                    .flat_map(|page| page.tables)
                    .map(|table| Table::new(table.header_rows.into_iter().chain(table.body_rows).collect()))
                    .collect();
                Ok(ExtractionResult::form(fields, tables))
            }
        }
    }
}

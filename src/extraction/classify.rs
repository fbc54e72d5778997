//! Choosing between plain OCR and form parsing for an upload.

use crate::extraction::document::RawDocument;

/// Which service processor handles a document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProcessorKind {
    /// Plain text recognition
    Ocr,
    /// Field/value and table extraction
    FormParser,
}

impl ProcessorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::FormParser => "form parser",
        }
    }
}

/// Policy deciding which processor a document is sent to.
pub trait ClassificationStrategy {
    fn classify(&self, document: &RawDocument) -> ProcessorKind;
}

impl<F> ClassificationStrategy for F
where
    F: Fn(&RawDocument) -> ProcessorKind,
{
    fn classify(&self, document: &RawDocument) -> ProcessorKind {
        self(document)
    }
}

/// Routes a document to form parsing when its file name contains a keyword,
/// compared case-insensitively; everything else goes to plain OCR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilenameHeuristic {
    keyword: String,
}

impl FilenameHeuristic {
    pub const DEFAULT_KEYWORD: &'static str = "form";

    pub fn new(keyword: &str) -> Self {
        Self { keyword: keyword.to_lowercase() }
    }
}

impl Default for FilenameHeuristic {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEYWORD)
    }
}

impl ClassificationStrategy for FilenameHeuristic {
    fn classify(&self, document: &RawDocument) -> ProcessorKind {
        if document.file_name.to_lowercase().contains(&self.keyword) {
            ProcessorKind::FormParser
        } else {
            ProcessorKind::Ocr
        }
    }
}

//! # OCR Sheet
//!
//! Turns what a document-understanding service extracted from an uploaded PDF
//! or image into a downloadable file: the recognized text as `.txt`, or a
//! multi-sheet `.xlsx` workbook holding the text, the form fields and every
//! detected table.
//!
//! ## Features
//!
//! - **Injected service client**: the remote OCR/form-parsing service sits behind
//!   [`DocumentProcessor`]; transport and credentials stay with the caller
//! - **Replaceable routing**: [`ClassificationStrategy`] decides between plain OCR
//!   and form parsing (default: file name contains `form`)
//! - **Deterministic workbooks**: identical input yields byte-identical `.xlsx`
//!   output, with no embedded timestamps
//! - **Pure Rust writer**: SpreadsheetML parts written with `quick-xml` into a
//!   `zip` container
//!
//! ## Example
//!
//! ```
//! use ocr_sheet::{normalize, ExportFormat, ExtractionResult, FormFields};
//!
//! let fields: FormFields = [("Name", "Alice"), ("Age", "30")].into_iter().collect();
//! let result = ExtractionResult::form(fields, Vec::new());
//! let export = normalize(&result, ExportFormat::Spreadsheet)?;
//! assert_eq!(export.file_name, "form_data.xlsx");
//! # Ok::<(), ocr_sheet::OcrSheetError>(())
//! ```

pub mod error;
pub mod export;
pub mod extraction;
mod helpers;
pub mod spreadsheet;

pub use crate::error::OcrSheetError;
pub use crate::export::normalize;
pub use crate::export::Export;
pub use crate::export::ExportFormat;
pub use crate::extraction::classify::ClassificationStrategy;
pub use crate::extraction::classify::FilenameHeuristic;
pub use crate::extraction::classify::ProcessorKind;
pub use crate::extraction::document::ProcessedDocument;
pub use crate::extraction::document::RawDocument;
pub use crate::extraction::processor::DocumentProcessor;
pub use crate::extraction::processor::Extractor;
pub use crate::extraction::processor::ProcessorConfig;
pub use crate::extraction::ExtractionResult;
pub use crate::extraction::FormFields;
pub use crate::extraction::Table;
pub use crate::extraction::UNKNOWN_PLACEHOLDER;

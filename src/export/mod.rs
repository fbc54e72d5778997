//! # Export Module
//!
//! Turns an [`ExtractionResult`] into a downloadable artifact: the raw text as a
//! UTF-8 file, or a workbook with the text or form fields on the first sheet and
//! one sheet per detected table.

use crate::error::OcrSheetError;
use crate::extraction::ExtractionResult;
use crate::extraction::FormFields;
use crate::extraction::Table;
use crate::spreadsheet::Sheet;
use crate::spreadsheet::Workbook;
use std::fmt;
use tracing::debug;
use tracing::info;

pub const TEXT_FILE_NAME: &str = "extracted_text.txt";
pub const TEXT_SPREADSHEET_FILE_NAME: &str = "extracted_text.xlsx";
pub const FORM_SPREADSHEET_FILE_NAME: &str = "form_data.xlsx";

pub const TEXT_MIME_TYPE: &str = "text/plain";
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the first sheet, and column label of the plain text export.
pub const EXTRACTED_TEXT_SHEET: &str = "Extracted Text";
pub const FIELD_COLUMN: &str = "Field";
pub const VALUE_COLUMN: &str = "Value";

/// Requested output format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// UTF-8 text file
    #[default]
    Text,
    /// Excel 2007+ workbook
    Spreadsheet,
}

impl ExportFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Spreadsheet => "spreadsheet",
        }
    }

    /// Parses a format name (case-insensitive):
    /// - Text: "text", "txt"
    /// - Spreadsheet: "spreadsheet", "excel", "xlsx"
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "TEXT" | "TXT" => Some(Self::Text),
            "SPREADSHEET" | "EXCEL" | "XLSX" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A produced artifact, ready to be offered for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Normalizes an extraction result into a text file or a workbook.
///
/// Plain text honors `format`. Form results are always exported as a workbook:
/// the first sheet lists fields under `Field`/`Value`, then each table gets a
/// `Table_<n>` sheet with its rows as given.
pub fn normalize(result: &ExtractionResult, format: ExportFormat) -> Result<Export, OcrSheetError> {
    let export = match (result, format) {
        (ExtractionResult::PlainText { text }, ExportFormat::Text) => Export {
            file_name: TEXT_FILE_NAME,
            mime_type: TEXT_MIME_TYPE,
            bytes: text.as_bytes().to_vec(),
        },
        (ExtractionResult::PlainText { text }, ExportFormat::Spreadsheet) => Export {
            file_name: TEXT_SPREADSHEET_FILE_NAME,
            mime_type: SPREADSHEET_MIME_TYPE,
            bytes: text_workbook(text)?.to_xlsx()?,
        },
        (ExtractionResult::FormResult { fields, tables }, format) => {
            if format != ExportFormat::Spreadsheet {
                debug!("Form results are only exported as spreadsheets, ignoring {} format", format);
            }
            Export {
                file_name: FORM_SPREADSHEET_FILE_NAME,
                mime_type: SPREADSHEET_MIME_TYPE,
                bytes: form_workbook(fields, tables)?.to_xlsx()?,
            }
        }
    };
    info!("Exported {} ({} bytes)", export.file_name, export.bytes.len());
    Ok(export)
}

/// One sheet, one column, one row holding the whole text.
pub fn text_workbook(text: &str) -> Result<Workbook, OcrSheetError> {
    let mut sheet = Sheet::new(EXTRACTED_TEXT_SHEET).with_header([EXTRACTED_TEXT_SHEET]);
    sheet.push_row([text]);

    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet)?;
    Ok(workbook)
}

/// Field/value sheet followed by one sheet per table.
pub fn form_workbook(fields: &FormFields, tables: &[Table]) -> Result<Workbook, OcrSheetError> {
    let mut workbook = Workbook::new();

    let mut sheet = Sheet::new(EXTRACTED_TEXT_SHEET).with_header([FIELD_COLUMN, VALUE_COLUMN]);
    for (name, value) in fields.iter() {
        sheet.push_row([name, value]);
    }
    workbook.add_sheet(sheet)?;

    for (index, table) in tables.iter().enumerate() {
        let mut sheet = Sheet::new(&table_sheet_name(index));
        for row in table.rows() {
            sheet.push_row(row.iter().map(String::as_str));
        }
        workbook.add_sheet(sheet)?;
    }
    Ok(workbook)
}

/// Sheet name of the table at 0-based `index`.
pub fn table_sheet_name(index: usize) -> String {
    format!("Table_{}", index + 1)
}

//! # Spreadsheet Module
//!
//! In-memory workbook model and its serialization to Excel 2007+ (`.xlsx`).
//! A [`Workbook`] is an ordered list of uniquely named [`Sheet`]s holding string
//! cells; [`Workbook::to_xlsx`] turns it into a byte buffer.

pub(crate) mod reference;
mod shared_strings;
mod sheet;
mod xlsx;

pub use crate::spreadsheet::sheet::Sheet;
use crate::error::OcrSheetError;
use thiserror::Error;

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LENGTH: usize = 31;

/// Characters a sheet name may not contain.
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Errors raised while building or serializing a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Sheet name '{0}' is already used in this workbook")]
    DuplicateSheetNameError(String),

    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetNameError { name: String, reason: &'static str },
}

/// Ordered collection of sheets forming one spreadsheet document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet after validating its name against the sheets already present.
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<(), SpreadsheetError> {
        validate_sheet_name(&sheet.name)?;
        if self.sheets.iter().any(|existing| existing.name.to_lowercase() == sheet.name.to_lowercase()) {
            return Err(SpreadsheetError::DuplicateSheetNameError(sheet.name));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Serializes the workbook as an `.xlsx` document.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, OcrSheetError> {
        xlsx::write_workbook(self)
    }
}

/// Checks the naming rules spreadsheet applications enforce on sheet tabs.
fn validate_sheet_name(name: &str) -> Result<(), SpreadsheetError> {
    let invalid = |reason| SpreadsheetError::InvalidSheetNameError { name: name.to_owned(), reason };
    if name.is_empty() {
        Err(invalid("name is empty"))
    } else if name.chars().count() > MAX_SHEET_NAME_LENGTH {
        Err(invalid("name is longer than 31 characters"))
    } else if name.contains(FORBIDDEN_SHEET_NAME_CHARS) {
        Err(invalid("name contains one of [ ] : * ? / \\"))
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Err(invalid("name starts or ends with an apostrophe"))
    } else {
        Ok(())
    }
}

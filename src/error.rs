use thiserror::Error;

/// Main error type for the OCR Sheet library.
/// Every failure reaches the caller as one of these, with a human-readable message.
#[derive(Error, Debug)]
pub enum OcrSheetError {
    /// Text cannot be represented in the requested output.
    /// The bundled exporters never raise it: characters XML cannot carry are escaped as `_xHHHH_`.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The spreadsheet serializer could not finalize the buffer.
    #[error("Write error: {0}")]
    WriteError(String),

    /// The extraction result does not match the declared processor kind.
    #[error("Malformed result: {0}")]
    MalformedResultError(String),

    /// The document-understanding service failed.
    #[error("Service error: {0:#}")]
    ServiceError(#[source] anyhow::Error),

    /// The uploaded document is not a PDF or a supported image.
    #[error("Unsupported document '{0}'")]
    UnsupportedDocument(String),
}

impl From<std::io::Error> for OcrSheetError {
    fn from(error: std::io::Error) -> Self {
        OcrSheetError::WriteError(error.to_string())
    }
}

impl From<zip::result::ZipError> for OcrSheetError {
    fn from(error: zip::result::ZipError) -> Self {
        OcrSheetError::WriteError(error.to_string())
    }
}

impl From<quick_xml::Error> for OcrSheetError {
    fn from(error: quick_xml::Error) -> Self {
        OcrSheetError::WriteError(error.to_string())
    }
}

impl From<crate::spreadsheet::SpreadsheetError> for OcrSheetError {
    fn from(error: crate::spreadsheet::SpreadsheetError) -> Self {
        OcrSheetError::WriteError(error.to_string())
    }
}

pub(crate) trait ResultMessage {
    /// Prepends context to the error message, keeping the error kind.
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, OcrSheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| match e {
            OcrSheetError::EncodingError(m) => OcrSheetError::EncodingError(format!("{}: {}", message, m)),
            OcrSheetError::WriteError(m) => OcrSheetError::WriteError(format!("{}: {}", message, m)),
            OcrSheetError::MalformedResultError(m) => OcrSheetError::MalformedResultError(format!("{}: {}", message, m)),
            OcrSheetError::ServiceError(error) => OcrSheetError::ServiceError(error.context(message.to_owned())),
            OcrSheetError::UnsupportedDocument(m) => OcrSheetError::UnsupportedDocument(m),
        })
    }
}

//! Spreadsheet error types.

use thiserror::Error;

/// Errors raised while reading or writing spreadsheets.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be parsed.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The CSV data could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The xlsx file could not be written.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook has no sheet or the sheet has no header row.
    #[error("spreadsheet is empty")]
    Empty,

    /// The file extension is not a supported spreadsheet format.
    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

/// Spreadsheet result type.
pub type SheetResult<T> = Result<T, SheetError>;

//! Spreadsheet writer.
//!
//! Files are rendered fully in memory and written in one go, so a failure
//! never leaves a partial file behind.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{SheetError, SheetResult};
use crate::export::SheetRecord;

/// Name of the single sheet in exported workbooks.
pub const SHEET_NAME: &str = "data";

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputKind {
    /// Excel workbook.
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl OutputKind {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    /// Renders rows in this format.
    pub fn render<R: SheetRecord>(self, rows: &[R]) -> SheetResult<Vec<u8>> {
        match self {
            Self::Xlsx => to_xlsx(rows),
            Self::Csv => to_csv(rows),
        }
    }
}

/// Renders rows as an xlsx workbook with a header row.
pub fn to_xlsx<R: SheetRecord>(rows: &[R]) -> SheetResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(R::HEADERS) {
        worksheet.write_string(0, col, *header)?;
    }
    for (row, record) in (1u32..).zip(rows) {
        for (col, value) in (0u16..).zip(record.cells()) {
            worksheet.write_string(row, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Renders rows as CSV with a header row.
pub fn to_csv<R: SheetRecord>(rows: &[R]) -> SheetResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(R::HEADERS)?;
    for record in rows {
        writer.write_record(record.cells())?;
    }
    writer
        .into_inner()
        .map_err(|e| SheetError::Io(e.into_error()))
}

/// Writes a rendered export into `dir`, creating it if needed.
pub fn save(dir: &Path, file_name: &str, bytes: &[u8]) -> SheetResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote export");
    Ok(path)
}

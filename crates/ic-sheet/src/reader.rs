//! Spreadsheet reader.
//!
//! The first sheet's first row is the header. Every following row becomes a
//! [`SheetRow`] keyed by header; missing cells read as `""` and fully blank
//! rows are skipped.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{SheetError, SheetResult};

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Any workbook format calamine detects (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`).
    Workbook,
    /// Comma-separated values.
    Csv,
}

impl SourceFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(SheetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// One data row of a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number in the sheet, the header being row 1.
    pub number: usize,
    /// Cell values keyed by header, in column order.
    pub cells: IndexMap<String, String>,
}

impl SheetRow {
    /// Returns the trimmed value of a column, or `""` when absent.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map_or("", |v| v.trim())
    }

    /// Returns the value of a column when it is present and not blank.
    #[must_use]
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|v| !v.is_empty())
    }

    fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

/// Reads a spreadsheet file.
pub fn read_file(path: &Path) -> SheetResult<Vec<SheetRow>> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    read_bytes(&bytes, format)
}

/// Reads a spreadsheet from an in-memory buffer.
pub fn read_bytes(bytes: &[u8], format: SourceFormat) -> SheetResult<Vec<SheetRow>> {
    let table = match format {
        SourceFormat::Workbook => workbook_table(bytes)?,
        SourceFormat::Csv => csv_table(bytes)?,
    };
    let rows = keyed_rows(table)?;
    debug!(rows = rows.len(), ?format, "read spreadsheet");
    Ok(rows)
}

fn workbook_table(bytes: &[u8]) -> SheetResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::Empty)?;
    let range = workbook.worksheet_range(&first)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn csv_table(bytes: &[u8]) -> SheetResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut table = Vec::new();
    for record in reader.records() {
        table.push(record?.iter().map(str::to_string).collect());
    }
    Ok(table)
}

fn keyed_rows(table: Vec<Vec<String>>) -> SheetResult<Vec<SheetRow>> {
    let mut rows = table.into_iter();
    let header: Vec<String> = rows
        .next()
        .ok_or(SheetError::Empty)?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    if header.iter().all(String::is_empty) {
        return Err(SheetError::Empty);
    }

    Ok(rows
        .enumerate()
        .map(|(index, values)| {
            let mut cells = IndexMap::with_capacity(header.len());
            let mut values = values.into_iter();
            for key in &header {
                let value = values.next().unwrap_or_default();
                if !key.is_empty() {
                    cells.insert(key.clone(), value);
                }
            }
            SheetRow {
                number: index + 2,
                cells,
            }
        })
        .filter(|row| !row.is_blank())
        .collect())
}

/// Renders a cell the way a spreadsheet shows it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

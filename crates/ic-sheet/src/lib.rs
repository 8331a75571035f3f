//! # ic-sheet
//!
//! Spreadsheet I/O for bulk import and export of identity records.
//!
//! - [`reader`] turns a workbook or CSV buffer into header-keyed rows
//! - [`import`] validates rows into typed import rows and create payloads
//! - [`export`] projects records into flat export rows
//! - [`writer`] serializes export rows to `.xlsx` or `.csv`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod export;
pub mod import;
pub mod reader;
pub mod writer;

pub use error::{SheetError, SheetResult};
pub use export::{GroupExportRow, RoleExportRow, SheetRecord, UserExportRow};
pub use import::{GroupImportRow, ImportRow, RoleImportRow, RowIssue, UserImportRow};
pub use reader::{SheetRow, SourceFormat};
pub use writer::OutputKind;

/// Record kind handled by import and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Users.
    User,
    /// Groups.
    Group,
    /// Roles.
    Role,
}

impl Entity {
    /// Singular lowercase name, as used in export file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Role => "role",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

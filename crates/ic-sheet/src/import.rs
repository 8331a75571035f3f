//! Typed import rows.
//!
//! Each spreadsheet row is validated into a typed row before any request is
//! built. Rows missing a required column are not sent; they come back as a
//! [`RowIssue`].

use std::fmt;

use ic_model::{namespace, CreateGroupRequest, CreateRoleRequest, CreateUserRequest};
use serde::Serialize;

use crate::reader::SheetRow;

/// `passwordOption` value asking the user to set their own password.
pub const ASK_PASSWORD: &str = "ask-password";

/// Why a row was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based sheet row number.
    pub row: usize,
    /// Column at fault.
    pub column: String,
    /// What is wrong.
    pub message: String,
}

impl RowIssue {
    fn missing(row: &SheetRow, column: &str) -> Self {
        Self {
            row: row.number,
            column: column.to_string(),
            message: format!("missing required column `{column}`"),
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// A spreadsheet row validated for one record kind.
pub trait ImportRow: Sized {
    /// Create payload sent for the row.
    type Request: Serialize + Send + Sync;

    /// Validates a sheet row.
    fn from_row(row: &SheetRow) -> Result<Self, RowIssue>;

    /// Sheet row number the value came from.
    fn row_number(&self) -> usize;

    /// Qualified name of the record to create.
    fn label(&self) -> String;

    /// Builds the create payload.
    fn to_request(&self) -> Self::Request;
}

/// Validates every row, splitting valid rows from issues.
pub fn parse_rows<R: ImportRow>(rows: &[SheetRow]) -> (Vec<R>, Vec<RowIssue>) {
    let mut valid = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();
    for row in rows {
        match R::from_row(row) {
            Ok(parsed) => valid.push(parsed),
            Err(issue) => issues.push(issue),
        }
    }
    (valid, issues)
}

fn required<'a>(row: &'a SheetRow, column: &str) -> Result<&'a str, RowIssue> {
    row.non_blank(column).ok_or_else(|| RowIssue::missing(row, column))
}

/// A user row.
///
/// Columns: `userName` (required), `domain`, `email`, `firstName`,
/// `lastName`, `newPassword`, `passwordOption`, `profileUrl`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserImportRow {
    /// Sheet row number.
    pub row: usize,
    /// Unqualified username.
    pub user_name: String,
    /// Userstore domain.
    pub domain: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Initial password.
    pub new_password: String,
    /// Password onboarding option.
    pub password_option: String,
    /// Profile URL.
    pub profile_url: String,
}

impl UserImportRow {
    /// Returns true when the user picks their own password.
    #[must_use]
    pub fn asks_password(&self) -> bool {
        self.password_option.is_empty() || self.password_option == ASK_PASSWORD
    }
}

impl ImportRow for UserImportRow {
    type Request = CreateUserRequest;

    fn from_row(row: &SheetRow) -> Result<Self, RowIssue> {
        Ok(Self {
            row: row.number,
            user_name: required(row, "userName")?.to_string(),
            domain: row.get("domain").to_string(),
            email: row.get("email").to_string(),
            first_name: row.get("firstName").to_string(),
            last_name: row.get("lastName").to_string(),
            new_password: row.get("newPassword").to_string(),
            password_option: row.get("passwordOption").to_string(),
            profile_url: row.get("profileUrl").to_string(),
        })
    }

    fn row_number(&self) -> usize {
        self.row
    }

    fn label(&self) -> String {
        namespace::qualify(&self.domain, &self.user_name)
    }

    fn to_request(&self) -> CreateUserRequest {
        let request = CreateUserRequest::new(&self.domain, &self.user_name)
            .with_email(&self.email)
            .with_name(&self.first_name, &self.last_name)
            .with_password(&self.new_password)
            .with_profile_url(&self.profile_url);
        if self.asks_password() {
            request.ask_password()
        } else {
            request
        }
    }
}

/// A group row.
///
/// Columns: `groupName` (required), `domain`, `roles` (comma-separated role
/// ids assigned once the group exists).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupImportRow {
    /// Sheet row number.
    pub row: usize,
    /// Unqualified group name.
    pub group_name: String,
    /// Userstore domain.
    pub domain: String,
    /// Role ids to assign.
    pub roles: Vec<String>,
}

impl ImportRow for GroupImportRow {
    type Request = CreateGroupRequest;

    fn from_row(row: &SheetRow) -> Result<Self, RowIssue> {
        Ok(Self {
            row: row.number,
            group_name: required(row, "groupName")?.to_string(),
            domain: row.get("domain").to_string(),
            roles: row
                .get("roles")
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    fn row_number(&self) -> usize {
        self.row
    }

    fn label(&self) -> String {
        namespace::qualify(&self.domain, &self.group_name)
    }

    fn to_request(&self) -> CreateGroupRequest {
        CreateGroupRequest::new(&self.domain, &self.group_name)
    }
}

/// A role row. Column: `roleName` (required).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleImportRow {
    /// Sheet row number.
    pub row: usize,
    /// Role name.
    pub role_name: String,
}

impl ImportRow for RoleImportRow {
    type Request = CreateRoleRequest;

    fn from_row(row: &SheetRow) -> Result<Self, RowIssue> {
        Ok(Self {
            row: row.number,
            role_name: required(row, "roleName")?.to_string(),
        })
    }

    fn row_number(&self) -> usize {
        self.row
    }

    fn label(&self) -> String {
        self.role_name.clone()
    }

    fn to_request(&self) -> CreateRoleRequest {
        CreateRoleRequest::new(self.role_name.as_str())
    }
}

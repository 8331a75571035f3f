//! User-facing notices and the error classification every call site shares.

use std::fmt;

use crate::error::ClientError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    /// Operation succeeded.
    Success,
    /// Informational.
    Info,
    /// Non-fatal problem.
    Warning,
    /// Operation failed.
    Error,
}

/// Operation a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Listing or searching users.
    FetchUsers,
    /// Creating a user.
    AddUser,
    /// Deleting a user.
    DeleteUser,
    /// Listing or searching groups.
    FetchGroups,
    /// Creating a group.
    CreateGroup,
    /// Deleting a group.
    DeleteGroup,
    /// Assigning a role to a new group.
    AssignGroupRole,
    /// Listing or searching roles.
    FetchRoles,
    /// Creating a role.
    CreateRole,
    /// Deleting a role.
    DeleteRole,
    /// Listing or reading identity providers.
    FetchIdentityProviders,
    /// Creating, updating or deleting an identity provider.
    ManageIdentityProvider,
    /// Listing userstores.
    FetchUserstores,
    /// Exporting records to a spreadsheet.
    Export,
}

impl Operation {
    /// Returns the short failure message for this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::FetchUsers => "Error while fetching users",
            Self::AddUser => "Error while adding the user",
            Self::DeleteUser => "Error while deleting the user",
            Self::FetchGroups => "Error while fetching groups",
            Self::CreateGroup => "Error while creating the group",
            Self::DeleteGroup => "Error while deleting the group",
            Self::AssignGroupRole => "Error while assigning the role",
            Self::FetchRoles => "Error while fetching roles",
            Self::CreateRole => "Error while creating the role",
            Self::DeleteRole => "Error while deleting the role",
            Self::FetchIdentityProviders => "Error while fetching identity providers",
            Self::ManageIdentityProvider => "Error while updating the identity provider",
            Self::FetchUserstores => "Error while fetching userstores",
            Self::Export => "Error while exporting records",
        }
    }

    /// Returns the short success message for this operation.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::FetchUsers => "Users fetched",
            Self::AddUser => "User added successfully",
            Self::DeleteUser => "User deleted successfully",
            Self::FetchGroups => "Groups fetched",
            Self::CreateGroup => "Group created successfully",
            Self::DeleteGroup => "Group deleted successfully",
            Self::AssignGroupRole => "Role assigned successfully",
            Self::FetchRoles => "Roles fetched",
            Self::CreateRole => "Role created successfully",
            Self::DeleteRole => "Role deleted successfully",
            Self::FetchIdentityProviders => "Identity providers fetched",
            Self::ManageIdentityProvider => "Identity provider updated successfully",
            Self::FetchUserstores => "Userstores fetched",
            Self::Export => "Records exported successfully",
        }
    }
}

/// Generic description for authentication failures.
pub const REAUTHENTICATE: &str =
    "The request was not authorized. Check your credentials and sign in again.";

/// Generic description for unclassified failures.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// A non-blocking, user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: AlertLevel,
    /// Short headline.
    pub message: String,
    /// Longer explanation.
    pub description: String,
}

impl Notice {
    /// Creates a success notice for an operation.
    #[must_use]
    pub fn success(operation: Operation, description: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            message: operation.success_message().to_string(),
            description: description.into(),
        }
    }

    /// Creates a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            message: message.into(),
            description: description.into(),
        }
    }

    /// Creates an error notice for an operation.
    #[must_use]
    pub fn error(operation: Operation, description: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: operation.failure_message().to_string(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.message, self.description)
        }
    }
}

/// Classifies a failed call into a notice.
///
/// - no response, or 401: generic re-authentication message
/// - server-supplied `detail`/`description`: surfaced verbatim
/// - anything else: generic fallback
#[must_use]
pub fn classify(error: &ClientError, operation: Operation) -> Notice {
    if error.is_transport() || error.status() == Some(401) {
        return Notice::error(operation, REAUTHENTICATE);
    }
    match error.body().and_then(|b| b.explanation()) {
        Some(detail) => Notice::error(operation, detail),
        None => Notice::error(operation, GENERIC_FAILURE),
    }
}

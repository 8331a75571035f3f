//! Export row projections.

use chrono::{DateTime, FixedOffset};
use ic_model::scim::join_display;
use ic_model::{Group, Meta, Role, User};
use serde::Serialize;

use crate::Entity;

/// Timestamp layout of exported rows.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A flat row that can be written to a sheet.
pub trait SheetRecord: Serialize {
    /// Column headers, in order.
    const HEADERS: &'static [&'static str];

    /// Cell values, aligned with [`Self::HEADERS`].
    fn cells(&self) -> Vec<String>;
}

/// Formats a server timestamp in the given offset.
///
/// Absent timestamps render as `""`; values that are not RFC 3339 are kept
/// as they are.
#[must_use]
pub fn format_timestamp(value: Option<&str>, offset: FixedOffset) -> String {
    match value {
        None => String::new(),
        Some(raw) => DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| raw.to_string(),
            |ts| ts.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        ),
    }
}

/// Export file name: `list_<entity>_<unix-millis>.<ext>`.
#[must_use]
pub fn export_file_name(entity: Entity, unix_millis: i64, extension: &str) -> String {
    format!("list_{}_{}.{}", entity.as_str(), unix_millis, extension)
}

fn timestamps(meta: Option<&Meta>, offset: FixedOffset) -> (String, String) {
    (
        format_timestamp(meta.and_then(|m| m.created.as_deref()), offset),
        format_timestamp(meta.and_then(|m| m.last_modified.as_deref()), offset),
    )
}

/// Exported user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExportRow {
    /// Running 1-based number.
    pub number: usize,
    /// User id.
    pub id: String,
    /// Qualified username.
    pub user_name: String,
    /// Family name.
    pub family_name: String,
    /// Given name.
    pub given_name: String,
    /// First email address.
    pub email: String,
    /// Role names, comma-joined.
    pub roles: String,
    /// Group names, comma-joined.
    pub group: String,
    /// Creation time.
    pub created: String,
    /// Last modification time.
    pub last_modified: String,
}

impl UserExportRow {
    /// Projects users into rows.
    #[must_use]
    pub fn project(users: &[User], offset: FixedOffset) -> Vec<Self> {
        users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let (created, last_modified) = timestamps(user.meta.as_ref(), offset);
                Self {
                    number: index + 1,
                    id: user.id.clone(),
                    user_name: user.user_name.clone(),
                    family_name: user.family_name().to_string(),
                    given_name: user.given_name().to_string(),
                    email: user.primary_email().unwrap_or_default().to_string(),
                    roles: join_display(user.roles.as_deref()),
                    group: join_display(user.groups.as_deref()),
                    created,
                    last_modified,
                }
            })
            .collect()
    }
}

impl SheetRecord for UserExportRow {
    const HEADERS: &'static [&'static str] = &[
        "number",
        "id",
        "userName",
        "familyName",
        "givenName",
        "email",
        "roles",
        "group",
        "created",
        "lastModified",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.id.clone(),
            self.user_name.clone(),
            self.family_name.clone(),
            self.given_name.clone(),
            self.email.clone(),
            self.roles.clone(),
            self.group.clone(),
            self.created.clone(),
            self.last_modified.clone(),
        ]
    }
}

/// Exported group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupExportRow {
    /// Running 1-based number.
    pub number: usize,
    /// Group id.
    pub id: String,
    /// Qualified group name.
    pub display_name: String,
    /// Member names, comma-joined.
    pub members: String,
    /// Role names, comma-joined.
    pub roles: String,
    /// Creation time.
    pub created: String,
    /// Last modification time.
    pub last_modified: String,
}

impl GroupExportRow {
    /// Projects groups into rows.
    #[must_use]
    pub fn project(groups: &[Group], offset: FixedOffset) -> Vec<Self> {
        groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let (created, last_modified) = timestamps(group.meta.as_ref(), offset);
                Self {
                    number: index + 1,
                    id: group.id.clone(),
                    display_name: group.display_name.clone(),
                    members: join_display(group.members.as_deref()),
                    roles: join_display(group.roles.as_deref()),
                    created,
                    last_modified,
                }
            })
            .collect()
    }
}

impl SheetRecord for GroupExportRow {
    const HEADERS: &'static [&'static str] = &[
        "number",
        "id",
        "displayName",
        "members",
        "roles",
        "created",
        "lastModified",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.id.clone(),
            self.display_name.clone(),
            self.members.clone(),
            self.roles.clone(),
            self.created.clone(),
            self.last_modified.clone(),
        ]
    }
}

/// Exported role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleExportRow {
    /// Running 1-based number.
    pub number: usize,
    /// Role id.
    pub id: String,
    /// Role name.
    pub display_name: String,
    /// Group names, comma-joined.
    pub group: String,
    /// User names, comma-joined.
    pub user: String,
}

impl RoleExportRow {
    /// Projects roles, fetched in detail, into rows.
    #[must_use]
    pub fn project(roles: &[Role]) -> Vec<Self> {
        roles
            .iter()
            .enumerate()
            .map(|(index, role)| Self {
                number: index + 1,
                id: role.id.clone(),
                display_name: role.display_name.clone(),
                group: join_display(role.groups.as_deref()),
                user: join_display(role.users.as_deref()),
            })
            .collect()
    }
}

impl SheetRecord for RoleExportRow {
    const HEADERS: &'static [&'static str] = &["number", "id", "displayName", "group", "user"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.id.clone(),
            self.display_name.clone(),
            self.group.clone(),
            self.user.clone(),
        ]
    }
}

//! Group resource and create-request payload.

use serde::{Deserialize, Serialize};

use crate::namespace;
use crate::scim::{schemas, Meta, ResourceRef};

/// A group as returned by the SCIM groups endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique identifier.
    pub id: String,
    /// Qualified group name.
    #[serde(default)]
    pub display_name: String,
    /// Member users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ResourceRef>>,
    /// Roles assigned to the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<ResourceRef>>,
    /// Server metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Group {
    /// Returns true when this group lives in a reserved namespace.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        namespace::is_reserved(&self.display_name)
    }

    /// Returns a reference to this group suitable for patch bodies.
    #[must_use]
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef::new(self.id.clone(), self.display_name.clone())
    }
}

/// Request body for `POST /Groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Message schemas.
    pub schemas: Vec<String>,
    /// Qualified group name.
    pub display_name: String,
    /// Initial members.
    pub members: Vec<ResourceRef>,
}

impl CreateGroupRequest {
    /// Creates a request for a group in the given userstore.
    #[must_use]
    pub fn new(domain: &str, group_name: &str) -> Self {
        Self {
            schemas: vec![schemas::GROUP.to_string()],
            display_name: namespace::qualify(domain, group_name),
            members: Vec::new(),
        }
    }
}

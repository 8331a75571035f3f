//! Role resource and create-request payload.

use serde::{Deserialize, Serialize};

use crate::namespace;
use crate::scim::{schemas, Meta, ResourceRef};

/// A role as returned by the SCIM roles endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique identifier.
    pub id: String,
    /// Role name, possibly namespaced (`Internal/`, `Application/`).
    #[serde(default)]
    pub display_name: String,
    /// Users holding the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<ResourceRef>>,
    /// Groups holding the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ResourceRef>>,
    /// Granted permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    /// Server metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Role {
    /// Returns true when this role lives in a reserved namespace.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        namespace::is_reserved(&self.display_name)
    }

    /// Returns true when this role is an application role.
    #[must_use]
    pub fn is_application(&self) -> bool {
        namespace::is_application(&self.display_name)
    }
}

/// A permission entry in either of the two shapes servers emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permission {
    /// Bare permission path.
    Plain(String),
    /// Permission object.
    Detailed {
        /// Permission path.
        value: String,
        /// Display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display: Option<String>,
    },
}

/// Request body for `POST /Roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    /// Message schemas.
    pub schemas: Vec<String>,
    /// Role name.
    pub display_name: String,
    /// Initial users.
    pub users: Vec<ResourceRef>,
    /// Initial groups.
    pub groups: Vec<ResourceRef>,
    /// Granted permission paths.
    pub permissions: Vec<String>,
}

impl CreateRoleRequest {
    /// Creates a request for a role with no members or permissions.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            schemas: vec![schemas::ROLE.to_string()],
            display_name: display_name.into(),
            users: Vec::new(),
            groups: Vec::new(),
            permissions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_with_mixed_permissions() {
        let json = r#"{
            "id": "r-1",
            "displayName": "Application/console",
            "permissions": ["/permission/admin", {"value": "/permission/login", "display": "Login"}]
        }"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.is_application());
        assert!(role.is_reserved());
        assert_eq!(role.permissions.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn create_request_shape() {
        let json = serde_json::to_value(CreateRoleRequest::new("auditor")).unwrap();
        assert_eq!(json["displayName"], "auditor");
        assert_eq!(json["schemas"][0], schemas::ROLE);
        assert_eq!(json["users"], serde_json::json!([]));
        assert_eq!(json["permissions"], serde_json::json!([]));
    }
}

//! SCIM 2.0 envelopes shared by every resource type.

use serde::{Deserialize, Serialize};

/// Well-known SCIM schema URNs.
pub mod schemas {
    /// Core user schema.
    pub const USER: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
    /// Enterprise user extension.
    pub const ENTERPRISE_USER: &str = "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";
    /// Core group schema.
    pub const GROUP: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
    /// Role extension schema.
    pub const ROLE: &str = "urn:ietf:params:scim:schemas:extension:2.0:Role";
    /// Search request message.
    pub const SEARCH_REQUEST: &str = "urn:ietf:params:scim:api:messages:2.0:SearchRequest";
    /// Patch operation message.
    pub const PATCH_OP: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";
    /// List response message.
    pub const LIST_RESPONSE: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";
}

/// SCIM list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Total number of matching resources, when the server can count them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    /// Number of resources in this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
    /// 1-based index of the first resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    /// The resources. Servers omit the key entirely for empty results.
    #[serde(rename = "Resources", default = "Vec::new")]
    pub resources: Vec<T>,
    /// Message schemas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            total_results: Some(0),
            items_per_page: None,
            start_index: Some(1),
            resources: Vec::new(),
            schemas: vec![schemas::LIST_RESPONSE.to_string()],
        }
    }
}

impl<T> ListResponse<T> {
    /// Returns the number of resources actually present in the envelope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true when the envelope carries no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Resource metadata maintained by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Creation timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Last modification timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Canonical resource URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Resource type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

/// Reference to a related resource (group member, role assignment, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Identifier of the referenced resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Human-readable name of the referenced resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// URI of the referenced resource.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ResourceRef {
    /// Creates a reference with both id and display name.
    #[must_use]
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            display: Some(display.into()),
            reference: None,
        }
    }
}

/// Joins the display names of a relation list with commas.
///
/// Entries without a display name contribute an empty segment, and an absent
/// list yields an empty string. There is never a trailing comma.
#[must_use]
pub fn join_display(refs: Option<&[ResourceRef]>) -> String {
    refs.unwrap_or_default()
        .iter()
        .map(|r| r.display.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

/// SCIM search request (`POST /.search`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Message schemas.
    pub schemas: Vec<String>,
    /// SCIM filter expression, e.g. `displayName sw admin`.
    pub filter: String,
    /// 1-based start index.
    pub start_index: u64,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Userstore to restrict the search to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl SearchRequest {
    /// Creates a search request starting at the first result.
    #[must_use]
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            schemas: vec![schemas::SEARCH_REQUEST.to_string()],
            filter: filter.into(),
            start_index: 1,
            count: None,
            domain: None,
        }
    }

    /// Restricts the search to a userstore.
    #[must_use]
    pub fn with_domain(mut self, domain: Option<&str>) -> Self {
        self.domain = domain.map(str::to_string);
        self
    }
}

/// SCIM patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Add values.
    Add,
    /// Remove values.
    Remove,
    /// Replace values.
    Replace,
}

/// A single patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,
    /// Attribute path, absent when `value` is a partial resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Operation value.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub value: serde_json::Value,
}

/// SCIM patch request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchRequest {
    /// Message schemas.
    pub schemas: Vec<String>,
    /// Operations applied in order.
    #[serde(rename = "Operations")]
    pub operations: Vec<PatchOperation>,
}

impl PatchRequest {
    /// Creates a patch request from a list of operations.
    #[must_use]
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self {
            schemas: vec![schemas::PATCH_OP.to_string()],
            operations,
        }
    }

    /// Builds the patch that assigns a group to a role.
    #[must_use]
    pub fn add_group(group: &ResourceRef) -> Self {
        Self::new(vec![PatchOperation {
            op: PatchOp::Add,
            path: None,
            value: serde_json::json!({ "groups": [group] }),
        }])
    }
}

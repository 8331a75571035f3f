//! Userstore (directory partition) representations.

use serde::{Deserialize, Serialize};

/// Userstore entry from the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserstoreSummary {
    /// Identifier.
    pub id: String,
    /// Domain name used to qualify identifiers.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resource link.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Userstore detail with its configuration properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserstoreDetail {
    /// Domain name.
    #[serde(default)]
    pub name: String,
    /// Implementation class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Configuration properties.
    #[serde(default)]
    pub properties: Vec<UserstoreProperty>,
}

impl UserstoreDetail {
    /// Returns true when the `Disabled` property is set to `"true"`.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.properties
            .iter()
            .find(|p| p.name == "Disabled")
            .is_some_and(|p| p.value == "true")
    }
}

/// Userstore configuration property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserstoreProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    #[serde(default)]
    pub value: String,
}

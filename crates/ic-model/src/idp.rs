//! Identity provider management resources.
//!
//! Unlike the SCIM resources these come from the server's REST management
//! API, which reports totals and accepts `REPLACE` operation lists for
//! partial updates.

use serde::{Deserialize, Serialize};

/// An identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    /// Unique identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the provider can be used for login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Whether this is the tenant's primary provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    /// Whether the provider is a federation hub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_federation_hub: Option<bool>,
    /// Home realm identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_realm_identifier: Option<String>,
    /// Remaining attributes (certificate, claims, roles, provisioning, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Paged identity provider list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderList {
    /// Total number of providers.
    #[serde(default)]
    pub total_results: u64,
    /// 1-based index of the first provider.
    #[serde(default)]
    pub start_index: u64,
    /// Number of providers in this page.
    #[serde(default)]
    pub count: u64,
    /// The providers.
    #[serde(default)]
    pub identity_providers: Vec<IdentityProvider>,
    /// Navigation links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Navigation link in a paged list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// Relation (`next`, `previous`).
    pub rel: String,
}

/// A single `REPLACE` operation of an identity provider patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceOperation {
    /// Always `REPLACE`.
    pub operation: String,
    /// JSON-pointer style attribute path, e.g. `/name`.
    pub path: String,
    /// New value.
    pub value: serde_json::Value,
}

/// Builds the patch body replacing every attribute of `idp` except `id`.
///
/// Returns the provider id and the operations.
#[must_use]
pub fn replace_operations(idp: &serde_json::Map<String, serde_json::Value>) -> (Option<String>, Vec<ReplaceOperation>) {
    let id = idp.get("id").and_then(|v| v.as_str()).map(str::to_string);
    let ops = idp
        .iter()
        .filter(|(key, _)| key.as_str() != "id")
        .map(|(key, value)| ReplaceOperation {
            operation: "REPLACE".to_string(),
            path: format!("/{key}"),
            value: value.clone(),
        })
        .collect();
    (id, ops)
}

/// Identity provider template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderTemplate {
    /// Template identifier.
    pub id: String,
    /// Template name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category (`DEFAULT`, `CUSTOM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Template payload and remaining attributes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Paged template list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderTemplateList {
    /// Total number of templates.
    #[serde(default)]
    pub total_results: u64,
    /// 1-based index of the first template.
    #[serde(default)]
    pub start_index: u64,
    /// Number of templates in this page.
    #[serde(default)]
    pub count: u64,
    /// The templates.
    #[serde(default)]
    pub templates: Vec<IdentityProviderTemplate>,
}

/// Federated authenticator configured on a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticator {
    /// Authenticator identifier.
    #[serde(default)]
    pub authenticator_id: String,
    /// Authenticator name.
    #[serde(default)]
    pub name: String,
    /// Whether the authenticator is enabled.
    #[serde(default)]
    pub is_enabled: bool,
    /// Whether it is the provider's default authenticator.
    #[serde(default)]
    pub is_default: bool,
    /// Configuration properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Server-side description of a federated authenticator type.
///
/// List entries carry no properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticatorMeta {
    /// Authenticator identifier.
    pub authenticator_id: String,
    /// Internal name.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Properties the authenticator accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMeta>,
    /// Remaining attributes (`self`, `tags`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Server-side description of an outbound provisioning connector type.
///
/// List entries carry no properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundConnectorMeta {
    /// Connector identifier.
    pub connector_id: String,
    /// Internal name.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Properties the connector accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMeta>,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Description of one configuration property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMeta {
    /// Property key.
    pub key: String,
    /// Label.
    #[serde(default)]
    pub display_name: String,
    /// Value type (`STRING`, `BOOLEAN`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Whether a value must be given.
    #[serde(default)]
    pub is_mandatory: bool,
    /// Whether the value is a secret.
    #[serde(default)]
    pub is_confidential: bool,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Remaining attributes (description, regex, options, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outbound provisioning connector configured on a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundConnector {
    /// Connector identifier.
    #[serde(default)]
    pub connector_id: String,
    /// Connector name.
    #[serde(default)]
    pub name: String,
    /// Whether the connector is enabled.
    #[serde(default)]
    pub is_enabled: bool,
    /// Whether it is the provider's default connector.
    #[serde(default)]
    pub is_default: bool,
    /// Whether provisioning blocks the triggering request.
    #[serde(default)]
    pub blocking_enabled: bool,
    /// Whether provisioning rules apply.
    #[serde(default)]
    pub rules_enabled: bool,
    /// Configuration properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Just-in-time provisioning settings of a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JitProvisioning {
    /// Whether federated users are provisioned locally.
    #[serde(default)]
    pub is_enabled: bool,
    /// Provisioning scheme, e.g. `PROVISION_SILENTLY` or `PROMPT_CONSENT`.
    #[serde(default)]
    pub scheme: String,
    /// Userstore provisioned users land in.
    #[serde(default)]
    pub userstore: String,
    /// Whether existing local users are linked instead of duplicated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associate_local_user: Option<bool>,
}

/// Claim configuration of a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimConfig {
    /// Claim identifying the federated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id_claim: Option<ClaimRef>,
    /// Claim carrying the federated roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_claim: Option<ClaimRef>,
    /// Provider claim to local claim mappings.
    #[serde(default)]
    pub mappings: Vec<ClaimMapping>,
    /// Claims sent when provisioning outbound.
    #[serde(default)]
    pub provisioning_claims: Vec<ProvisioningClaim>,
}

/// Reference to a claim by URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRef {
    /// Claim URI.
    pub uri: String,
    /// Local claim identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A provider claim mapped onto a local claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMapping {
    /// Claim name at the provider.
    pub idp_claim: String,
    /// Local claim.
    pub local_claim: ClaimRef,
}

/// A claim sent on outbound provisioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningClaim {
    /// The claim.
    pub claim: ClaimRef,
    /// Value used when the user has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A local (resident) authenticator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAuthenticator {
    /// Identifier.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Whether the authenticator is enabled.
    #[serde(default)]
    pub is_enabled: bool,
    /// Authenticator type (`LOCAL`, `REQUEST_PATH`).
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Key/value configuration property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property key.
    pub key: String,
    /// Property value.
    #[serde(default)]
    pub value: String,
}

/// Mapping between provider roles and local roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMappings {
    /// Individual mappings.
    #[serde(default)]
    pub mappings: Vec<RoleMapping>,
    /// Claim carrying the provider roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_provisioning_roles: Option<Vec<String>>,
}

/// A single provider-to-local role mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMapping {
    /// Role name at the provider.
    pub idp_role: String,
    /// Local role name.
    pub local_role: String,
}

//! Identity provider management endpoint.
//!
//! Every call pins the success status the endpoint documents; any other
//! success status is reported as [`ClientError::UnexpectedStatus`].

use ic_model::idp::{
    replace_operations, ClaimConfig, FederatedAuthenticator, FederatedAuthenticatorMeta,
    IdentityProviderTemplate, IdentityProviderTemplateList, JitProvisioning, LocalAuthenticator,
    OutboundConnector, OutboundConnectorMeta, RoleMappings,
};
use ic_model::{IdentityProvider, IdentityProviderList};
use reqwest::StatusCode;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

fn base(client: &ApiClient) -> &str {
    &client.context().endpoints.identity_providers
}

/// Lists identity providers.
///
/// `required_attributes` names extra attributes to include, e.g.
/// `isFederationHub`.
pub async fn list(
    client: &ApiClient,
    limit: Option<usize>,
    offset: Option<usize>,
    filter: Option<&str>,
    required_attributes: Option<&str>,
) -> ClientResult<IdentityProviderList> {
    client
        .get(
            base(client),
            &[
                ("filter", filter.map(str::to_string)),
                ("limit", limit.map(|l| l.to_string())),
                ("offset", offset.map(|o| o.to_string())),
                ("requiredAttributes", required_attributes.map(str::to_string)),
            ],
        )
        .await
}

/// Gets an identity provider.
pub async fn get(client: &ApiClient, id: &str) -> ClientResult<IdentityProvider> {
    client.get(&format!("{}/{}", base(client), id), &[]).await
}

/// Creates an identity provider from a full JSON description.
pub async fn create(client: &ApiClient, idp: &Value) -> ClientResult<IdentityProvider> {
    client.create(base(client), idp).await
}

/// Deletes an identity provider.
pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
    client
        .delete(&format!("{}/{}", base(client), id), Some(StatusCode::NO_CONTENT))
        .await
}

/// Updates an identity provider by replacing every attribute except `id`.
pub async fn update(client: &ApiClient, idp: &Value) -> ClientResult<IdentityProvider> {
    let object = idp
        .as_object()
        .ok_or_else(|| ClientError::InvalidRequest("identity provider must be a JSON object".into()))?;
    let (id, operations) = replace_operations(object);
    let id = id.ok_or_else(|| ClientError::InvalidRequest("identity provider has no id".into()))?;
    client
        .patch(&format!("{}/{}", base(client), id), &operations)
        .await
}

/// Lists identity provider templates.
pub async fn list_templates(
    client: &ApiClient,
    limit: Option<usize>,
    offset: Option<usize>,
    filter: Option<&str>,
) -> ClientResult<IdentityProviderTemplateList> {
    client
        .get(
            &format!("{}/templates", base(client)),
            &[
                ("filter", filter.map(str::to_string)),
                ("limit", limit.map(|l| l.to_string())),
                ("offset", offset.map(|o| o.to_string())),
            ],
        )
        .await
}

/// Gets an identity provider template.
pub async fn get_template(client: &ApiClient, template_id: &str) -> ClientResult<IdentityProviderTemplate> {
    client
        .get(&format!("{}/templates/{}", base(client), template_id), &[])
        .await
}

/// Gets a federated authenticator of an identity provider.
pub async fn get_federated_authenticator(
    client: &ApiClient,
    idp_id: &str,
    authenticator_id: &str,
) -> ClientResult<FederatedAuthenticator> {
    let url = format!(
        "{}/{}/federated-authenticators/{}",
        base(client),
        idp_id,
        authenticator_id
    );
    client.get(&url, &[]).await
}

/// Updates a federated authenticator.
///
/// The authenticator id travels in the path and is stripped from the body.
pub async fn update_federated_authenticator(
    client: &ApiClient,
    idp_id: &str,
    authenticator: &FederatedAuthenticator,
) -> ClientResult<FederatedAuthenticator> {
    let url = format!(
        "{}/{}/federated-authenticators/{}",
        base(client),
        idp_id,
        authenticator.authenticator_id
    );
    let mut body = serde_json::to_value(authenticator)?;
    if let Some(object) = body.as_object_mut() {
        object.remove("authenticatorId");
    }
    client.put(&url, &body).await
}

/// Lists the federated authenticator types the server offers.
pub async fn list_federated_authenticator_meta(client: &ApiClient) -> ClientResult<Vec<FederatedAuthenticatorMeta>> {
    client
        .get(&format!("{}/meta/federated-authenticators", base(client)), &[])
        .await
}

/// Describes a federated authenticator type and its properties.
pub async fn get_federated_authenticator_meta(
    client: &ApiClient,
    authenticator_id: &str,
) -> ClientResult<FederatedAuthenticatorMeta> {
    let url = format!("{}/meta/federated-authenticators/{}", base(client), authenticator_id);
    client.get(&url, &[]).await
}

/// Lists the outbound provisioning connector types the server offers.
pub async fn list_outbound_connector_meta(client: &ApiClient) -> ClientResult<Vec<OutboundConnectorMeta>> {
    client
        .get(&format!("{}/meta/outbound-provisioning-connectors", base(client)), &[])
        .await
}

/// Describes an outbound provisioning connector type and its properties.
pub async fn get_outbound_connector_meta(client: &ApiClient, connector_id: &str) -> ClientResult<OutboundConnectorMeta> {
    let url = format!("{}/meta/outbound-provisioning-connectors/{}", base(client), connector_id);
    client.get(&url, &[]).await
}

/// Gets an outbound provisioning connector of an identity provider.
pub async fn get_outbound_connector(
    client: &ApiClient,
    idp_id: &str,
    connector_id: &str,
) -> ClientResult<OutboundConnector> {
    let url = format!(
        "{}/{}/provisioning/outbound-connectors/{}",
        base(client),
        idp_id,
        connector_id
    );
    client.get(&url, &[]).await
}

/// Updates an outbound provisioning connector.
///
/// The connector id travels in the path and is stripped from the body.
pub async fn update_outbound_connector(
    client: &ApiClient,
    idp_id: &str,
    connector: &OutboundConnector,
) -> ClientResult<OutboundConnector> {
    let url = format!(
        "{}/{}/provisioning/outbound-connectors/{}",
        base(client),
        idp_id,
        connector.connector_id
    );
    let mut body = serde_json::to_value(connector)?;
    if let Some(object) = body.as_object_mut() {
        object.remove("connectorId");
    }
    client.put(&url, &body).await
}

/// Replaces the just-in-time provisioning settings of an identity provider.
pub async fn update_jit_provisioning(
    client: &ApiClient,
    idp_id: &str,
    jit: &JitProvisioning,
) -> ClientResult<JitProvisioning> {
    client
        .put(&format!("{}/{}/provisioning/jit", base(client), idp_id), jit)
        .await
}

/// Replaces the claim configuration of an identity provider.
pub async fn update_claims(client: &ApiClient, idp_id: &str, claims: &ClaimConfig) -> ClientResult<ClaimConfig> {
    client
        .put(&format!("{}/{}/claims", base(client), idp_id), claims)
        .await
}

/// Replaces the role mappings of an identity provider.
pub async fn update_role_mappings(
    client: &ApiClient,
    idp_id: &str,
    mappings: &RoleMappings,
) -> ClientResult<RoleMappings> {
    client
        .put(&format!("{}/{}/roles", base(client), idp_id), mappings)
        .await
}

/// Lists the local authenticators.
pub async fn list_local_authenticators(client: &ApiClient) -> ClientResult<Vec<LocalAuthenticator>> {
    client
        .get(&client.context().endpoints.local_authenticators, &[])
        .await
}

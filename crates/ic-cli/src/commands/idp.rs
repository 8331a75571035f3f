//! Identity provider management commands.

use ic_client::{api, ApiClient, Operation};
use ic_model::idp::{
    ClaimConfig, FederatedAuthenticator, FederatedAuthenticatorMeta, IdentityProviderTemplate, JitProvisioning,
    LocalAuthenticator, OutboundConnector, OutboundConnectorMeta, RoleMappings,
};
use ic_model::IdentityProvider;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::IdpCommand;
use crate::config::OutputFormat;
use crate::output::{info, output, output_single, success};
use crate::{CliConfig, CliError};

use super::{confirm_delete, page_request, read_json};

/// Identity provider representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct IdpDisplay {
    /// Provider ID.
    pub id: String,
    /// Provider name.
    pub name: String,
    /// Whether the provider is enabled.
    pub enabled: bool,
    /// Description.
    pub description: String,
}

impl From<IdentityProvider> for IdpDisplay {
    fn from(idp: IdentityProvider) -> Self {
        Self {
            id: idp.id,
            name: idp.name,
            enabled: idp.is_enabled.unwrap_or_default(),
            description: idp.description.unwrap_or_default(),
        }
    }
}

/// Template representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TemplateDisplay {
    /// Template ID.
    pub id: String,
    /// Template name.
    pub name: String,
    /// Category.
    pub category: String,
}

impl From<IdentityProviderTemplate> for TemplateDisplay {
    fn from(template: IdentityProviderTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            category: template.category.unwrap_or_default(),
        }
    }
}

/// Local authenticator representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct LocalAuthenticatorDisplay {
    /// Authenticator ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Authenticator type.
    #[tabled(rename = "type")]
    pub kind: String,
    /// Whether the authenticator is enabled.
    pub enabled: bool,
}

impl From<LocalAuthenticator> for LocalAuthenticatorDisplay {
    fn from(authenticator: LocalAuthenticator) -> Self {
        Self {
            id: authenticator.id,
            name: authenticator.display_name,
            kind: authenticator.kind,
            enabled: authenticator.is_enabled,
        }
    }
}

/// Authenticator or connector type for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MetaDisplay {
    /// Type ID.
    pub id: String,
    /// Internal name.
    pub name: String,
    /// Display name.
    #[tabled(rename = "display name")]
    pub display_name: String,
}

impl From<FederatedAuthenticatorMeta> for MetaDisplay {
    fn from(meta: FederatedAuthenticatorMeta) -> Self {
        Self {
            id: meta.authenticator_id,
            name: meta.name,
            display_name: meta.display_name,
        }
    }
}

impl From<OutboundConnectorMeta> for MetaDisplay {
    fn from(meta: OutboundConnectorMeta) -> Self {
        Self {
            id: meta.connector_id,
            name: meta.name,
            display_name: meta.display_name,
        }
    }
}

/// Runs an identity provider command.
pub async fn run_idp(
    cmd: IdpCommand,
    client: &ApiClient,
    config: &CliConfig,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let fetch = CliError::during(Operation::FetchIdentityProviders);
    let manage = CliError::during(Operation::ManageIdentityProvider);

    match cmd {
        IdpCommand::List {
            filter,
            required_attributes,
            page,
        } => {
            let page = page_request(config, page);
            let list = api::idp::list(
                client,
                Some(page.limit),
                Some(page.offset),
                filter.as_deref(),
                required_attributes.as_deref(),
            )
            .await
            .map_err(fetch)?;
            let total = list.total_results;
            let rows: Vec<IdpDisplay> = list.identity_providers.into_iter().map(Into::into).collect();
            output(&rows, output_format)?;
            let shown = page.offset.saturating_add(rows.len());
            if output_format == OutputFormat::Table && total as usize > shown {
                info(&format!("Showing {} of {total}, use --offset {shown}", rows.len()));
            }
            Ok(())
        }
        IdpCommand::Get { id } => {
            let idp = api::idp::get(client, &id).await.map_err(fetch)?;
            output_single(&idp, output_format)
        }
        IdpCommand::Create { file } => {
            let body: serde_json::Value = read_json(&file)?;
            let idp = api::idp::create(client, &body).await.map_err(manage)?;
            success(&format!("Identity provider '{}' created successfully ({})", idp.name, idp.id));
            Ok(())
        }
        IdpCommand::Update { file } => {
            let body: serde_json::Value = read_json(&file)?;
            let idp = api::idp::update(client, &body).await.map_err(manage)?;
            success(&format!("Identity provider '{}' updated successfully", idp.name));
            Ok(())
        }
        IdpCommand::Delete { id, force } => {
            if !confirm_delete("identity provider", &id, force)? {
                return Ok(());
            }
            api::idp::delete(client, &id).await.map_err(manage)?;
            success(&format!("Identity provider '{id}' deleted successfully"));
            Ok(())
        }
        IdpCommand::Templates { filter, page } => {
            let page = page_request(config, page);
            let list = api::idp::list_templates(client, Some(page.limit), Some(page.offset), filter.as_deref())
                .await
                .map_err(fetch)?;
            let rows: Vec<TemplateDisplay> = list.templates.into_iter().map(Into::into).collect();
            output(&rows, output_format)
        }
        IdpCommand::Template { id } => {
            let template = api::idp::get_template(client, &id).await.map_err(fetch)?;
            output_single(&template, output_format)
        }
        IdpCommand::Authenticator {
            idp_id,
            authenticator_id,
        } => {
            let authenticator = api::idp::get_federated_authenticator(client, &idp_id, &authenticator_id)
                .await
                .map_err(fetch)?;
            output_single(&authenticator, output_format)
        }
        IdpCommand::UpdateAuthenticator { idp_id, file } => {
            let authenticator: FederatedAuthenticator = read_json(&file)?;
            if authenticator.authenticator_id.is_empty() {
                return Err(CliError::Validation("authenticatorId is required".to_string()));
            }
            api::idp::update_federated_authenticator(client, &idp_id, &authenticator)
                .await
                .map_err(manage)?;
            success(&format!(
                "Authenticator '{}' of '{idp_id}' updated successfully",
                authenticator.authenticator_id
            ));
            Ok(())
        }
        IdpCommand::RoleMappings { idp_id, file } => {
            let mappings: RoleMappings = read_json(&file)?;
            api::idp::update_role_mappings(client, &idp_id, &mappings)
                .await
                .map_err(manage)?;
            success(&format!(
                "{} role mapping(s) of '{idp_id}' updated successfully",
                mappings.mappings.len()
            ));
            Ok(())
        }
        IdpCommand::AuthenticatorMeta { id: Some(id) } => {
            let meta = api::idp::get_federated_authenticator_meta(client, &id)
                .await
                .map_err(fetch)?;
            output_single(&meta, output_format)
        }
        IdpCommand::AuthenticatorMeta { id: None } => {
            let metas = api::idp::list_federated_authenticator_meta(client).await.map_err(fetch)?;
            let rows: Vec<MetaDisplay> = metas.into_iter().map(Into::into).collect();
            output(&rows, output_format)
        }
        IdpCommand::ConnectorMeta { id: Some(id) } => {
            let meta = api::idp::get_outbound_connector_meta(client, &id).await.map_err(fetch)?;
            output_single(&meta, output_format)
        }
        IdpCommand::ConnectorMeta { id: None } => {
            let metas = api::idp::list_outbound_connector_meta(client).await.map_err(fetch)?;
            let rows: Vec<MetaDisplay> = metas.into_iter().map(Into::into).collect();
            output(&rows, output_format)
        }
        IdpCommand::Connector { idp_id, connector_id } => {
            let connector = api::idp::get_outbound_connector(client, &idp_id, &connector_id)
                .await
                .map_err(fetch)?;
            output_single(&connector, output_format)
        }
        IdpCommand::UpdateConnector { idp_id, file } => {
            let connector: OutboundConnector = read_json(&file)?;
            if connector.connector_id.is_empty() {
                return Err(CliError::Validation("connectorId is required".to_string()));
            }
            api::idp::update_outbound_connector(client, &idp_id, &connector)
                .await
                .map_err(manage)?;
            success(&format!(
                "Connector '{}' of '{idp_id}' updated successfully",
                connector.connector_id
            ));
            Ok(())
        }
        IdpCommand::Jit { idp_id, file } => {
            let jit: JitProvisioning = read_json(&file)?;
            api::idp::update_jit_provisioning(client, &idp_id, &jit)
                .await
                .map_err(manage)?;
            let state = if jit.is_enabled { "enabled" } else { "disabled" };
            success(&format!("Just-in-time provisioning of '{idp_id}' {state}"));
            Ok(())
        }
        IdpCommand::Claims { idp_id, file } => {
            let claims: ClaimConfig = read_json(&file)?;
            api::idp::update_claims(client, &idp_id, &claims).await.map_err(manage)?;
            success(&format!(
                "{} claim mapping(s) of '{idp_id}' updated successfully",
                claims.mappings.len()
            ));
            Ok(())
        }
        IdpCommand::LocalAuthenticators => {
            let authenticators = api::idp::list_local_authenticators(client).await.map_err(fetch)?;
            let rows: Vec<LocalAuthenticatorDisplay> = authenticators.into_iter().map(Into::into).collect();
            output(&rows, output_format)
        }
    }
}

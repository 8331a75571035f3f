//! Role management commands.

use ic_client::{api, ApiClient, Operation, RecordFetcher};
use ic_model::{CreateRoleRequest, PatchRequest, ResourceRef, Role};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::RoleCommand;
use crate::config::OutputFormat;
use crate::output::{output_page, output_single, success};
use crate::{CliConfig, CliError};

use super::{confirm_delete, load_page, page_request};

/// Role representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoleDisplay {
    /// Role ID.
    pub id: String,
    /// Role name.
    #[tabled(rename = "name")]
    pub display_name: String,
}

impl From<Role> for RoleDisplay {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            display_name: role.display_name,
        }
    }
}

/// Runs a role command.
pub async fn run_role(
    cmd: RoleCommand,
    client: &ApiClient,
    config: &CliConfig,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let fetcher = RecordFetcher::new(client);

    match cmd {
        RoleCommand::List { scope, domain, page } => {
            let domain = config.effective_domain(domain.as_deref());
            let page = load_page(
                fetcher
                    .fetch_roles(scope.into(), domain.as_deref(), page_request(config, page))
                    .await,
                Operation::FetchRoles,
            )?;
            output_page(&page.map(RoleDisplay::from), output_format)
        }
        RoleCommand::Search { filter, domain, page } => {
            let page = load_page(
                fetcher
                    .search_roles(&filter, domain.as_deref(), page_request(config, page))
                    .await,
                Operation::FetchRoles,
            )?;
            output_page(&page.map(RoleDisplay::from), output_format)
        }
        RoleCommand::Get { id } => {
            let role = api::roles::get(client, &id)
                .await
                .map_err(CliError::during(Operation::FetchRoles))?;
            output_single(&role, output_format)
        }
        RoleCommand::Create { name } => {
            let role = api::roles::create(client, &CreateRoleRequest::new(name))
                .await
                .map_err(CliError::during(Operation::CreateRole))?;
            success(&format!(
                "Role '{}' created successfully ({})",
                role.display_name, role.id
            ));
            Ok(())
        }
        RoleCommand::AssignGroup { role_id, group_id } => {
            let group = api::groups::get(client, &group_id)
                .await
                .map_err(CliError::during(Operation::FetchGroups))?;
            let patch = PatchRequest::add_group(&ResourceRef::new(group.id, group.display_name.clone()));
            api::roles::patch(client, &role_id, &patch)
                .await
                .map_err(CliError::during(Operation::AssignGroupRole))?;
            success(&format!(
                "Group '{}' assigned to role '{role_id}'",
                group.display_name
            ));
            Ok(())
        }
        RoleCommand::Delete { id, force } => {
            if !confirm_delete("role", &id, force)? {
                return Ok(());
            }
            api::roles::delete(client, &id)
                .await
                .map_err(CliError::during(Operation::DeleteRole))?;
            success(&format!("Role '{id}' deleted successfully"));
            Ok(())
        }
    }
}

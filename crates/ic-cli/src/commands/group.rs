//! Group management commands.

use ic_client::{api, classify, ApiClient, Notice, Operation, RecordFetcher};
use ic_model::{CreateGroupRequest, Group, PatchRequest};
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use crate::cli::GroupCommand;
use crate::config::OutputFormat;
use crate::output::{notify, output_page, output_single, success};
use crate::{CliConfig, CliError};

use super::{confirm_delete, load_page, page_request};

/// Group representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct GroupDisplay {
    /// Group ID.
    pub id: String,
    /// Group name.
    #[tabled(rename = "name")]
    pub display_name: String,
    /// Number of members.
    pub members: usize,
}

impl From<Group> for GroupDisplay {
    fn from(group: Group) -> Self {
        Self {
            members: group.members.as_ref().map_or(0, Vec::len),
            id: group.id,
            display_name: group.display_name,
        }
    }
}

/// Runs a group command.
pub async fn run_group(
    cmd: GroupCommand,
    client: &ApiClient,
    config: &CliConfig,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let fetcher = RecordFetcher::new(client);

    match cmd {
        GroupCommand::List { domain, page } => {
            let domain = config.effective_domain(domain.as_deref());
            let page = load_page(
                fetcher.fetch_groups(domain.as_deref(), page_request(config, page)).await,
                Operation::FetchGroups,
            )?;
            output_page(&page.map(GroupDisplay::from), output_format)
        }
        GroupCommand::Search { filter, domain, page } => {
            let page = load_page(
                fetcher
                    .search_groups(&filter, domain.as_deref(), page_request(config, page))
                    .await,
                Operation::FetchGroups,
            )?;
            output_page(&page.map(GroupDisplay::from), output_format)
        }
        GroupCommand::Get { id } => {
            let group = api::groups::get(client, &id)
                .await
                .map_err(CliError::during(Operation::FetchGroups))?;
            output_single(&group, output_format)
        }
        GroupCommand::Create { name, domain, roles } => {
            let request = CreateGroupRequest::new(&domain, &name);
            let (group, warnings) = create_group(client, &request, &roles)
                .await
                .map_err(CliError::during(Operation::CreateGroup))?;
            success(&format!(
                "Group '{}' created successfully ({})",
                group.display_name, group.id
            ));
            for notice in &warnings {
                notify(notice);
            }
            Ok(())
        }
        GroupCommand::Delete { id, force } => {
            if !confirm_delete("group", &id, force)? {
                return Ok(());
            }
            api::groups::delete(client, &id)
                .await
                .map_err(CliError::during(Operation::DeleteGroup))?;
            success(&format!("Group '{id}' deleted successfully"));
            Ok(())
        }
    }
}

/// Creates a group, then adds it to each role in `role_ids`.
///
/// Role assignment failures do not fail the creation; they come back as
/// warning notices.
pub async fn create_group(
    client: &ApiClient,
    request: &CreateGroupRequest,
    role_ids: &[String],
) -> ic_client::ClientResult<(Group, Vec<Notice>)> {
    let group = api::groups::create(client, request).await?;

    let patch = PatchRequest::add_group(&group.to_ref());
    let mut warnings = Vec::new();
    for role_id in role_ids {
        if let Err(e) = api::roles::patch(client, role_id, &patch).await {
            warn!(role_id = %role_id, group = %group.display_name, error = %e, "role assignment failed");
            let classified = classify(&e, Operation::AssignGroupRole);
            warnings.push(Notice::warning(
                format!("Role '{role_id}' was not assigned to '{}'", group.display_name),
                classified.description,
            ));
        }
    }
    Ok((group, warnings))
}

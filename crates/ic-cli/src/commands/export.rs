//! Export command implementation.

use chrono::{FixedOffset, Local, Offset, Utc};
use futures::future::try_join_all;
use ic_client::paging::moderate;
use ic_client::{api, ApiClient, ClientResult, Operation, PageRequest};
use ic_model::{Group, Role, User};
use ic_sheet::export::export_file_name;
use ic_sheet::{writer, Entity, GroupExportRow, OutputKind, RoleExportRow, UserExportRow};

use crate::cli::ExportArgs;
use crate::output::{info, success};
use crate::{CliError, CliResult};

/// Most users a single export carries.
pub const USER_EXPORT_LIMIT: usize = 1000;

/// A rendered export, not yet written.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// File name, `list_<entity>_<millis>.<ext>`.
    pub name: String,
    /// Encoded content.
    pub bytes: Vec<u8>,
    /// Number of data rows.
    pub rows: usize,
}

/// Runs the export command.
pub async fn run_export(args: ExportArgs, client: &ApiClient) -> CliResult<()> {
    let entity = Entity::from(args.entity);
    let offset = timestamp_offset(args.local_time, args.utc_offset.as_deref())?;

    info(&format!("Exporting {entity} records..."));

    let export = build_export(
        client,
        entity,
        args.format.into(),
        offset,
        args.domain.as_deref(),
        Utc::now().timestamp_millis(),
    )
    .await?;

    let path = writer::save(&args.dir, &export.name, &export.bytes)?;

    success(&format!("Exported {} {entity} row(s) to: {}", export.rows, path.display()));
    Ok(())
}

/// Fetches and renders an export. Nothing is produced if any fetch fails.
pub async fn build_export(
    client: &ApiClient,
    entity: Entity,
    kind: OutputKind,
    offset: FixedOffset,
    domain: Option<&str>,
    unix_millis: i64,
) -> CliResult<ExportFile> {
    let fetch_failed = CliError::during(Operation::Export);
    let (bytes, rows) = match entity {
        Entity::User => {
            let users = export_users(client, domain).await.map_err(fetch_failed)?;
            let rows = UserExportRow::project(&users, offset);
            (kind.render(&rows)?, rows.len())
        }
        Entity::Group => {
            let groups = export_groups(client, domain).await.map_err(fetch_failed)?;
            let rows = GroupExportRow::project(&groups, offset);
            (kind.render(&rows)?, rows.len())
        }
        Entity::Role => {
            let roles = export_roles(client, domain).await.map_err(fetch_failed)?;
            let rows = RoleExportRow::project(&roles);
            (kind.render(&rows)?, rows.len())
        }
    };

    Ok(ExportFile {
        name: export_file_name(entity, unix_millis, kind.extension()),
        bytes,
        rows,
    })
}

/// First [`USER_EXPORT_LIMIT`] users, unfiltered.
async fn export_users(client: &ApiClient, domain: Option<&str>) -> ClientResult<Vec<User>> {
    let page = PageRequest::new(USER_EXPORT_LIMIT, 0);
    let list = api::users::list(client, page.request_count(), page.start_index(), None, None, domain).await?;
    Ok(moderate(list.resources, page).items)
}

async fn export_groups(client: &ApiClient, domain: Option<&str>) -> ClientResult<Vec<Group>> {
    Ok(api::groups::list(client, domain).await?.resources)
}

/// Roles with their full details, since list entries carry no members.
async fn export_roles(client: &ApiClient, domain: Option<&str>) -> ClientResult<Vec<Role>> {
    let list = api::roles::list(client, domain).await?;
    try_join_all(list.resources.iter().map(|role| api::roles::get(client, &role.id))).await
}

/// Resolves the offset timestamps are written in.
pub fn timestamp_offset(local_time: bool, utc_offset: Option<&str>) -> CliResult<FixedOffset> {
    if local_time {
        return Ok(Local::now().offset().fix());
    }
    match utc_offset {
        None => Ok(Utc.fix()),
        Some(raw) => raw
            .parse::<FixedOffset>()
            .map_err(|e| CliError::InvalidArgument(format!("invalid UTC offset '{raw}': {e}"))),
    }
}

//! Userstore commands.

use futures::future::try_join_all;
use ic_client::{api, ApiClient, ClientResult, Operation};
use ic_model::UserstoreSummary;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::UserstoreCommand;
use crate::config::OutputFormat;
use crate::output::output;
use crate::CliError;

/// Userstore representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserstoreDisplay {
    /// Userstore ID.
    pub id: String,
    /// Domain name.
    pub name: String,
    /// Description.
    pub description: String,
}

impl From<UserstoreSummary> for UserstoreDisplay {
    fn from(store: UserstoreSummary) -> Self {
        Self {
            id: store.id,
            name: store.name,
            description: store.description.unwrap_or_default(),
        }
    }
}

/// Runs a userstore command.
pub async fn run_userstore(
    cmd: UserstoreCommand,
    client: &ApiClient,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    match cmd {
        UserstoreCommand::List { enabled_only } => {
            let stores = list_userstores(client, enabled_only)
                .await
                .map_err(CliError::during(Operation::FetchUserstores))?;
            let rows: Vec<UserstoreDisplay> = stores.into_iter().map(Into::into).collect();
            output(&rows, output_format)
        }
    }
}

/// Lists userstores other than the consumer userstore.
///
/// With `enabled_only`, each userstore's details are fetched and those with
/// `Disabled = true` are dropped.
pub async fn list_userstores(client: &ApiClient, enabled_only: bool) -> ClientResult<Vec<UserstoreSummary>> {
    let consumer = client.context().consumer_userstore.as_str();
    let stores: Vec<UserstoreSummary> = api::userstores::list(client)
        .await?
        .into_iter()
        .filter(|store| !store.name.eq_ignore_ascii_case(consumer))
        .collect();

    if !enabled_only {
        return Ok(stores);
    }

    let details = try_join_all(stores.iter().map(|store| api::userstores::get(client, &store.id))).await?;
    Ok(stores
        .into_iter()
        .zip(details)
        .filter(|(_, detail)| !detail.is_disabled())
        .map(|(store, _)| store)
        .collect())
}

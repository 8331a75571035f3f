//! Command implementations.

pub mod config;
pub mod export;
pub mod group;
pub mod idp;
pub mod import;
pub mod role;
pub mod user;
pub mod userstore;

pub use config::{run_config, run_status};
pub use export::run_export;
pub use group::run_group;
pub use idp::run_idp;
pub use import::run_import;
pub use role::run_role;
pub use user::run_user;
pub use userstore::run_userstore;

use ic_client::{ListView, Operation, Page, PageRequest};

use crate::cli::PageArgs;
use crate::output::error;
use crate::CliConfig;

/// Resolves a page window against the configured page size.
#[must_use]
pub fn page_request(config: &CliConfig, args: PageArgs) -> PageRequest {
    PageRequest::new(args.limit.unwrap_or(config.page_size), args.offset)
}

/// Asks before deleting unless forced. Returns false when cancelled.
fn confirm_delete(kind: &str, id: &str, force: bool) -> crate::CliResult<bool> {
    if force || crate::output::confirm(&format!("Are you sure you want to delete {kind} '{id}'?"))? {
        Ok(true)
    } else {
        error("Operation cancelled");
        Ok(false)
    }
}

/// Reads a JSON document from a file.
fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> crate::CliResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads a list result into a view, failing with its notice when cleared.
fn load_page<T>(result: ic_client::ClientResult<Page<T>>, operation: Operation) -> crate::CliResult<Page<T>> {
    let mut view = ListView::default();
    view.apply(result, operation);
    match view.notice {
        Some(notice) => Err(crate::CliError::Notice(notice)),
        None => Ok(view.page),
    }
}

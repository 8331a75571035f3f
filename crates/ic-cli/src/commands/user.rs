//! User management commands.

use ic_client::{api, ApiClient, Operation, RecordFetcher, UserQuery};
use ic_model::{CreateUserRequest, User};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::UserCommand;
use crate::config::OutputFormat;
use crate::output::{output_page, output_single, prompt_password, success};
use crate::{CliConfig, CliError};

use super::{confirm_delete, load_page, page_request};

/// User representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserDisplay {
    /// User ID.
    pub id: String,
    /// Username.
    #[tabled(rename = "username")]
    pub user_name: String,
    /// Email.
    pub email: String,
    /// First name.
    #[tabled(rename = "first name")]
    pub given_name: String,
    /// Last name.
    #[tabled(rename = "last name")]
    pub family_name: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        Self {
            email: user.primary_email().unwrap_or_default().to_string(),
            given_name: user.given_name().to_string(),
            family_name: user.family_name().to_string(),
            id: user.id,
            user_name: user.user_name,
        }
    }
}

/// Runs a user command.
pub async fn run_user(
    cmd: UserCommand,
    client: &ApiClient,
    config: &CliConfig,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    match cmd {
        UserCommand::List {
            filter,
            attributes,
            domain,
            page,
        } => {
            let query = UserQuery::new(page_request(config, page))
                .with_filter(filter)
                .with_attributes(attributes)
                .with_domain(config.effective_domain(domain.as_deref()));
            let page = load_page(
                RecordFetcher::new(client).fetch_users(&query).await,
                Operation::FetchUsers,
            )?;
            output_page(&page.map(UserDisplay::from), output_format)
        }
        UserCommand::Get { id } => {
            let user = api::users::get(client, &id)
                .await
                .map_err(CliError::during(Operation::FetchUsers))?;
            output_single(&user, output_format)
        }
        UserCommand::Create {
            username,
            domain,
            email,
            first_name,
            last_name,
            password,
            ask_password,
            profile_url,
        } => {
            let mut request = CreateUserRequest::new(&domain, &username)
                .with_email(email.as_deref().unwrap_or_default())
                .with_name(
                    first_name.as_deref().unwrap_or_default(),
                    last_name.as_deref().unwrap_or_default(),
                )
                .with_profile_url(profile_url.as_deref().unwrap_or_default());
            request = if ask_password {
                request.ask_password()
            } else {
                let password = match password {
                    Some(p) => p,
                    None => read_new_password()?,
                };
                request.with_password(&password)
            };
            create_user(client, &request).await
        }
        UserCommand::Delete { id, force } => {
            if !confirm_delete("user", &id, force)? {
                return Ok(());
            }
            api::users::delete(client, &id)
                .await
                .map_err(CliError::during(Operation::DeleteUser))?;
            success(&format!("User '{id}' deleted successfully"));
            Ok(())
        }
    }
}

/// Prompts for a password twice.
fn read_new_password() -> crate::CliResult<String> {
    let password = prompt_password("Enter password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(CliError::Validation("Passwords do not match".to_string()));
    }
    Ok(password)
}

/// Creates a user.
async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> crate::CliResult<()> {
    let user = api::users::create(client, request)
        .await
        .map_err(CliError::during(Operation::AddUser))?;
    success(&format!("User '{}' created successfully ({})", user.user_name, user.id));
    Ok(())
}

//! Configuration management commands.

use ic_client::{api, ApiClient, ClientError};

use crate::cli::ConfigCommand;
use crate::config::{AuthConfig, OutputFormat};
use crate::output::{error, info, prompt, prompt_password, success, warning};
use crate::{CliConfig, CliError};

const KNOWN_KEYS: &str = "server_url, tenant, default_domain, output_format, page_size, \
                          consumer_userstore, timeout_secs, username, password, token";

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            apply_setting(config, &key, &value)?;
            config.save()?;
            let shown = if is_secret(&key) { "****" } else { value.as_str() };
            success(&format!("Set {key} = {shown}"));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("server_url: {}", config.server_url);
    println!("tenant: {}", config.tenant);

    if let Some(domain) = &config.default_domain {
        println!("default_domain: {domain}");
    }

    println!("output_format: {:?}", config.output_format);
    println!("page_size: {}", config.page_size);
    println!("consumer_userstore: {}", config.consumer_userstore);
    println!("timeout_secs: {}", config.timeout_secs);

    if let Some(auth) = &config.auth {
        if let Some(username) = &auth.username {
            println!("username: {username}");
        }
        if auth.password.is_some() {
            println!("password: ****");
        }
        if auth.token.is_some() {
            println!("token: ****");
        }
    }

    Ok(())
}

fn is_secret(key: &str) -> bool {
    matches!(key, "password" | "token")
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> crate::CliResult<T> {
    value
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("{key} must be a positive number, got '{value}'")))
}

/// Applies one `key = value` setting without saving.
pub fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "server_url" | "server" => config.server_url = value.to_string(),
        "tenant" => config.tenant = value.to_string(),
        "default_domain" | "domain" => config.default_domain = optional(value),
        "output_format" | "output" => config.output_format = value.parse::<OutputFormat>()?,
        "page_size" => {
            let size: usize = number(key, value)?;
            if size == 0 {
                return Err(CliError::InvalidArgument("page_size must be at least 1".to_string()));
            }
            config.page_size = size;
        }
        "consumer_userstore" => config.consumer_userstore = value.to_string(),
        "timeout_secs" | "timeout" => config.timeout_secs = number(key, value)?,
        "username" => config.auth.get_or_insert_with(AuthConfig::default).username = optional(value),
        "password" => config.auth.get_or_insert_with(AuthConfig::default).password = optional(value),
        "token" => config.auth.get_or_insert_with(AuthConfig::default).token = optional(value),
        _ => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown configuration key: {key}. Known keys: {KNOWN_KEYS}"
            )));
        }
    }
    Ok(())
}

/// Initializes configuration interactively.
fn init_config(config: &mut CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info("Initializing identity console configuration...");
    println!();

    config.server_url = prompt("Server URL", &config.server_url)?;
    config.tenant = prompt("Tenant domain", &config.tenant)?;

    let domain = prompt(
        "Default userstore domain",
        config.default_domain.as_deref().unwrap_or("(none)"),
    )?;
    config.default_domain = if domain == "(none)" { None } else { optional(&domain) };

    let format = prompt(
        "Output format (table/json/yaml/quiet)",
        &format!("{:?}", config.output_format).to_lowercase(),
    )?;
    if let Ok(format) = format.parse() {
        config.output_format = format;
    }

    let current_user = config
        .auth
        .as_ref()
        .and_then(|auth| auth.username.clone())
        .unwrap_or_else(|| "(none)".to_string());
    let username = prompt("Admin username", &current_user)?;
    if username != "(none)" {
        let password = prompt_password("Admin password: ")?;
        let auth = config.auth.get_or_insert_with(AuthConfig::default);
        auth.username = optional(&username);
        if !password.is_empty() {
            auth.password = Some(password);
        }
    }

    config.save()?;

    println!();
    success(&format!("Configuration saved to: {}", config_path.display()));
    Ok(())
}

/// Status command.
pub async fn run_status(client: &ApiClient) -> crate::CliResult<()> {
    let ctx = client.context();
    info(&format!(
        "Checking server status at {} (tenant {})...",
        ctx.server_url, ctx.tenant
    ));

    match api::users::list(client, 1, 1, None, None, None).await {
        Ok(list) => {
            success("Server is reachable");
            println!();
            match list.total_results {
                Some(total) => println!("Users: {total}"),
                None => println!("Users: (not counted)"),
            }
        }
        Err(ClientError::Api { status: 401 | 403, .. }) => {
            success("Server is reachable");
            warning("Credentials were rejected; run `ic config init` or pass --token");
        }
        Err(e) => {
            error(&format!("Server is not reachable: {e}"));
        }
    }

    Ok(())
}

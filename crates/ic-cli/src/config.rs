//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use ic_client::context::DEFAULT_TENANT;
use ic_client::{ConsoleContext, Credentials};
use ic_model::namespace::CONSUMER_USERSTORE;
use serde::{Deserialize, Serialize};

use crate::{CliError, CliResult};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Server URL (e.g., https://localhost:9443).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Tenant domain.
    #[serde(default = "default_tenant")]
    pub tenant: String,

    /// Userstore used by list commands when `--domain` is not given.
    #[serde(default)]
    pub default_domain: Option<String>,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Page size of list commands.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Userstore whose users are hidden from user lists.
    #[serde(default = "default_consumer_userstore")]
    pub consumer_userstore: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

fn default_server_url() -> String {
    "https://localhost:9443".to_string()
}

fn default_tenant() -> String {
    DEFAULT_TENANT.to_string()
}

const fn default_page_size() -> usize {
    ic_client::paging::DEFAULT_PAGE_SIZE
}

fn default_consumer_userstore() -> String {
    CONSUMER_USERSTORE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            tenant: default_tenant(),
            default_domain: None,
            output_format: OutputFormat::default(),
            page_size: default_page_size(),
            consumer_userstore: default_consumer_userstore(),
            timeout_secs: default_timeout_secs(),
            auth: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from file.
    pub fn load() -> CliResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML.
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Saves configuration to file.
    pub fn save(&self) -> CliResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    pub fn config_path() -> CliResult<PathBuf> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".identity-console").join("console.toml"))
    }

    /// Gets the effective domain (from args or config).
    #[must_use]
    pub fn effective_domain(&self, arg_domain: Option<&str>) -> Option<String> {
        arg_domain
            .map(str::to_string)
            .or_else(|| self.default_domain.clone())
    }

    /// Builds the request context, letting flags override the file.
    pub fn context(
        &self,
        server: Option<&str>,
        tenant: Option<&str>,
        token: Option<&str>,
    ) -> CliResult<ConsoleContext> {
        let server_url = server.unwrap_or(&self.server_url);
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "server URL must start with http:// or https://: {server_url}"
            )));
        }
        let tenant = tenant.unwrap_or(&self.tenant);

        let credentials = match (token, &self.auth) {
            (Some(token), _) => Credentials::Bearer(token.to_string()),
            (None, Some(auth)) => auth.credentials(),
            (None, None) => Credentials::None,
        };

        Ok(ConsoleContext::new(server_url, tenant)
            .with_credentials(credentials)
            .with_consumer_userstore(self.consumer_userstore.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// Quiet (minimal output).
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "quiet" => Ok(Self::Quiet),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {value}. Supported: table, json, yaml, quiet"
            ))),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username for basic authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Password for basic authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// OAuth2 access token; takes precedence over username and password.
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthConfig {
    /// Converts to request credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        match (&self.token, &self.username, &self.password) {
            (Some(token), _, _) => Credentials::Bearer(token.clone()),
            (None, Some(username), Some(password)) => Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Credentials::None,
        }
    }
}

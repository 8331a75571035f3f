//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ic_client::RoleScope;
use ic_sheet::{Entity, OutputKind};

use crate::config::OutputFormat;

/// Identity console - administration tool for identity servers.
#[derive(Debug, Parser)]
#[command(name = "ic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config).
    #[arg(short, long, global = true, env = "IC_SERVER_URL")]
    pub server: Option<String>,

    /// Tenant domain (overrides config).
    #[arg(short, long, global = true, env = "IC_TENANT")]
    pub tenant: Option<String>,

    /// Access token (overrides configured credentials).
    #[arg(long, global = true, env = "IC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// User management commands.
    #[command(subcommand)]
    User(UserCommand),

    /// Group management commands.
    #[command(subcommand)]
    Group(GroupCommand),

    /// Role management commands.
    #[command(subcommand)]
    Role(RoleCommand),

    /// Identity provider management commands.
    #[command(subcommand)]
    Idp(IdpCommand),

    /// Userstore commands.
    #[command(subcommand)]
    Userstore(UserstoreCommand),

    /// Bulk import records from a spreadsheet.
    Import(ImportArgs),

    /// Export records to a spreadsheet.
    Export(ExportArgs),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Server status check.
    Status,
}

/// Page window arguments shared by list commands.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct PageArgs {
    /// Maximum results (defaults to the configured page size).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of results to skip.
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

/// User commands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users.
    List {
        /// SCIM filter, e.g. `userName sw alice`.
        #[arg(long)]
        filter: Option<String>,

        /// Comma-separated attributes to return.
        #[arg(long)]
        attributes: Option<String>,

        /// Userstore to list from.
        #[arg(long)]
        domain: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get user details.
    Get {
        /// User ID.
        id: String,
    },

    /// Create a new user.
    Create {
        /// Username.
        username: String,

        /// Userstore domain.
        #[arg(long, default_value = "primary")]
        domain: String,

        /// Email address.
        #[arg(long)]
        email: Option<String>,

        /// First name.
        #[arg(long)]
        first_name: Option<String>,

        /// Last name.
        #[arg(long)]
        last_name: Option<String>,

        /// Initial password (will prompt if neither this nor --ask-password is given).
        #[arg(long, conflicts_with = "ask_password")]
        password: Option<String>,

        /// Email the user a link to set their own password.
        #[arg(long)]
        ask_password: bool,

        /// Profile URL.
        #[arg(long)]
        profile_url: Option<String>,
    },

    /// Delete a user.
    Delete {
        /// User ID.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },
}

/// Group commands.
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// List groups.
    List {
        /// Userstore to list from.
        #[arg(long)]
        domain: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Search groups with a SCIM filter.
    Search {
        /// SCIM filter, e.g. `displayName sw dev`.
        filter: String,

        /// Userstore to search in.
        #[arg(long)]
        domain: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get group details.
    Get {
        /// Group ID.
        id: String,
    },

    /// Create a group.
    Create {
        /// Group name.
        name: String,

        /// Userstore domain.
        #[arg(long, default_value = "primary")]
        domain: String,

        /// Role IDs to assign to the new group.
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },

    /// Delete a group.
    Delete {
        /// Group ID.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },
}

/// Role list scope.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ScopeArg {
    /// Roles outside the reserved namespaces.
    #[default]
    Visible,
    /// Every role.
    All,
    /// Application roles only.
    Application,
    /// Everything except application roles.
    Internal,
}

impl From<ScopeArg> for RoleScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Visible => Self::Visible,
            ScopeArg::All => Self::All,
            ScopeArg::Application => Self::Application,
            ScopeArg::Internal => Self::Internal,
        }
    }
}

/// Role commands.
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List roles.
    List {
        /// Which roles to show.
        #[arg(long, value_enum, default_value = "visible")]
        scope: ScopeArg,

        /// Userstore to list from.
        #[arg(long)]
        domain: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Search roles with a SCIM filter.
    Search {
        /// SCIM filter, e.g. `displayName sw admin`.
        filter: String,

        /// Userstore to search in.
        #[arg(long)]
        domain: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get role details, including users, groups and permissions.
    Get {
        /// Role ID.
        id: String,
    },

    /// Create a role.
    Create {
        /// Role name.
        name: String,
    },

    /// Assign a group to a role.
    AssignGroup {
        /// Role ID.
        role_id: String,

        /// Group ID.
        group_id: String,
    },

    /// Delete a role.
    Delete {
        /// Role ID.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },
}

/// Identity provider commands.
#[derive(Debug, Subcommand)]
pub enum IdpCommand {
    /// List identity providers.
    List {
        /// Filter, e.g. `name sw google`.
        #[arg(long)]
        filter: Option<String>,

        /// Extra attributes to include, e.g. `isFederationHub`.
        #[arg(long)]
        required_attributes: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get identity provider details.
    Get {
        /// Identity provider ID.
        id: String,
    },

    /// Create an identity provider from a JSON file.
    Create {
        /// JSON file describing the provider.
        file: PathBuf,
    },

    /// Update an identity provider from a JSON file carrying its `id`.
    Update {
        /// JSON file describing the provider.
        file: PathBuf,
    },

    /// Delete an identity provider.
    Delete {
        /// Identity provider ID.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// List identity provider templates.
    Templates {
        /// Filter, e.g. `category eq DEFAULT`.
        #[arg(long)]
        filter: Option<String>,

        /// Page window.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get an identity provider template.
    Template {
        /// Template ID.
        id: String,
    },

    /// Get a federated authenticator of a provider.
    Authenticator {
        /// Identity provider ID.
        idp_id: String,

        /// Authenticator ID.
        authenticator_id: String,
    },

    /// Update a federated authenticator from a JSON file.
    UpdateAuthenticator {
        /// Identity provider ID.
        idp_id: String,

        /// JSON file describing the authenticator.
        file: PathBuf,
    },

    /// Replace the role mappings of a provider from a JSON file.
    RoleMappings {
        /// Identity provider ID.
        idp_id: String,

        /// JSON file with `mappings` and `outboundProvisioningRoles`.
        file: PathBuf,
    },

    /// List federated authenticator types, or describe one.
    AuthenticatorMeta {
        /// Authenticator ID; lists every type when omitted.
        id: Option<String>,
    },

    /// List outbound provisioning connector types, or describe one.
    ConnectorMeta {
        /// Connector ID; lists every type when omitted.
        id: Option<String>,
    },

    /// Get an outbound provisioning connector of a provider.
    Connector {
        /// Identity provider ID.
        idp_id: String,

        /// Connector ID.
        connector_id: String,
    },

    /// Update an outbound provisioning connector from a JSON file.
    UpdateConnector {
        /// Identity provider ID.
        idp_id: String,

        /// JSON file describing the connector, including `connectorId`.
        file: PathBuf,
    },

    /// Replace the just-in-time provisioning settings from a JSON file.
    Jit {
        /// Identity provider ID.
        idp_id: String,

        /// JSON file with `isEnabled`, `scheme` and `userstore`.
        file: PathBuf,
    },

    /// Replace the claim configuration of a provider from a JSON file.
    Claims {
        /// Identity provider ID.
        idp_id: String,

        /// JSON file with `userIdClaim`, `roleClaim`, `mappings` and `provisioningClaims`.
        file: PathBuf,
    },

    /// List local authenticators.
    LocalAuthenticators,
}

/// Userstore commands.
#[derive(Debug, Subcommand)]
pub enum UserstoreCommand {
    /// List userstores.
    List {
        /// Hide disabled userstores (fetches each userstore's details).
        #[arg(long)]
        enabled_only: bool,
    },
}

/// Record kind argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EntityArg {
    /// Users.
    Users,
    /// Groups.
    Groups,
    /// Roles.
    Roles,
}

impl From<EntityArg> for Entity {
    fn from(entity: EntityArg) -> Self {
        match entity {
            EntityArg::Users => Self::User,
            EntityArg::Groups => Self::Group,
            EntityArg::Roles => Self::Role,
        }
    }
}

/// Import arguments.
#[derive(Debug, clap::Args)]
pub struct ImportArgs {
    /// Kind of records in the file.
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// Spreadsheet file (.xlsx, .xls, .ods or .csv).
    pub file: PathBuf,

    /// Validate rows and print the payloads without creating anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Export file format argument.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook.
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl From<ExportFormat> for OutputKind {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Xlsx => Self::Xlsx,
            ExportFormat::Csv => Self::Csv,
        }
    }
}

/// Export arguments.
#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// Kind of records to export.
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// File format.
    #[arg(short, long, value_enum, default_value = "xlsx")]
    pub format: ExportFormat,

    /// Directory to write the file to.
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Userstore to export from.
    #[arg(long)]
    pub domain: Option<String>,

    /// Format timestamps in the host's local offset instead of UTC.
    #[arg(long, conflicts_with = "utc_offset")]
    pub local_time: bool,

    /// Format timestamps in a fixed offset, e.g. `+05:30`.
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}

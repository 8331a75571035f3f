//! # Identity console
//!
//! Command-line administration for identity servers.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use ic_cli::{
    cli::{Cli, Command},
    commands::{
        run_config, run_export, run_group, run_idp, run_import, run_role, run_status, run_user,
        run_userstore,
    },
    config::CliConfig,
    output::error,
    CliResult,
};
use ic_client::ApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "warn,ic_client=debug,ic_sheet=debug,ic_cli=debug";

fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli, mut config: CliConfig) -> CliResult<()> {
    let output = cli.output.unwrap_or(config.output_format);

    let command = match cli.command {
        Command::Config(cmd) => return run_config(cmd, &mut config),
        command => command,
    };

    let context = config.context(cli.server.as_deref(), cli.tenant.as_deref(), cli.token.as_deref())?;
    let client = ApiClient::new(context)?;
    tracing::debug!(server = %client.context().server_url, tenant = %client.context().tenant, "client ready");

    match command {
        Command::User(cmd) => run_user(cmd, &client, &config, output).await,
        Command::Group(cmd) => run_group(cmd, &client, &config, output).await,
        Command::Role(cmd) => run_role(cmd, &client, &config, output).await,
        Command::Idp(cmd) => run_idp(cmd, &client, &config, output).await,
        Command::Userstore(cmd) => run_userstore(cmd, &client, output).await,
        Command::Import(args) => run_import(args, &client).await,
        Command::Export(args) => run_export(args, &client).await,
        Command::Status => run_status(&client).await,
        Command::Config(cmd) => run_config(cmd, &mut config),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        error(&e.to_string());
        std::process::exit(1);
    }
}

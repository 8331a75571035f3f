//! # ic-cli
//!
//! Command-line administration console for identity servers.
//!
//! This crate provides:
//! - User, group and role management with paginated, filtered lists
//! - Identity provider and userstore management
//! - Bulk import of users, groups and roles from spreadsheets
//! - Export of users, groups and roles to `.xlsx` or `.csv`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};

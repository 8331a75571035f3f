//! CLI error types.

use ic_client::{classify, ClientError, Notice, Operation};
use ic_sheet::SheetError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A server call failed; carries the classified notice.
    #[error("{0}")]
    Notice(Notice),

    /// Client error outside a classified operation.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Spreadsheet error.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Classifies a client error for an operation.
    #[must_use]
    pub fn during(operation: Operation) -> impl FnOnce(ClientError) -> Self {
        move |error| Self::Notice(classify(&error, operation))
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

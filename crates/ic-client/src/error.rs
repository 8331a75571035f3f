//! Client error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the identity server.
///
/// SCIM endpoints use `detail`; the management API uses `description` and
/// `message`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error code (`UMM-65001`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Longer description (management API).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// SCIM error detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Parses an error body, returning `None` when it is not JSON.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Returns the most specific human-readable explanation.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Errors raised while talking to the identity server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: no HTTP response was received.
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error: {status}{suffix}", suffix = explanation_suffix(.body))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Parsed error body, if any.
        body: Option<ApiErrorBody>,
    },

    /// The server answered with a success status other than the expected one.
    #[error("unexpected status {status}, expected {expected}")]
    UnexpectedStatus {
        /// Received status.
        status: u16,
        /// Expected status.
        expected: u16,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Returns the HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Returns true when no HTTP response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(e) if e.status().is_none())
    }

    /// Returns the server's error body, if one was parsed.
    #[must_use]
    pub fn body(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn explanation_suffix(body: &Option<ApiErrorBody>) -> String {
    body.as_ref()
        .and_then(ApiErrorBody::explanation)
        .map(|d| format!(" - {d}"))
        .unwrap_or_default()
}

/// Client result type.
pub type ClientResult<T> = Result<T, ClientError>;

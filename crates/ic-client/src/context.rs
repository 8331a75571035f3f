//! Explicit request context.
//!
//! Everything a call needs to know about the server it talks to travels in a
//! [`ConsoleContext`] value handed to [`crate::ApiClient::new`].

use std::time::Duration;

use ic_model::namespace::CONSUMER_USERSTORE;

/// Tenant used when none is configured.
pub const DEFAULT_TENANT: &str = "carbon.super";

/// Connection and identity settings for one console session.
#[derive(Debug, Clone)]
pub struct ConsoleContext {
    /// Server base URL, e.g. `https://localhost:9443`.
    pub server_url: String,
    /// Tenant domain.
    pub tenant: String,
    /// Credentials attached to every request.
    pub credentials: Credentials,
    /// Resolved endpoint URLs.
    pub endpoints: Endpoints,
    /// Userstore whose users are hidden from user lists.
    pub consumer_userstore: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ConsoleContext {
    /// Creates a context for a server and tenant with default settings.
    #[must_use]
    pub fn new(server_url: &str, tenant: &str) -> Self {
        let server_url = server_url.trim_end_matches('/').to_string();
        let endpoints = Endpoints::for_tenant(&server_url, tenant);
        Self {
            server_url,
            tenant: tenant.to_string(),
            credentials: Credentials::None,
            endpoints,
            consumer_userstore: CONSUMER_USERSTORE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the consumer userstore name.
    #[must_use]
    pub fn with_consumer_userstore(mut self, name: impl Into<String>) -> Self {
        self.consumer_userstore = name.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Credentials attached to outgoing requests.
#[derive(Clone, Default)]
pub enum Credentials {
    /// No authentication header.
    #[default]
    None,
    /// HTTP basic authentication.
    Basic {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// OAuth2 bearer token.
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"****")
                .finish(),
            Self::Bearer(_) => f.write_str("Bearer(****)"),
        }
    }
}

/// Endpoint URLs of the collections the console works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// SCIM users collection.
    pub users: String,
    /// SCIM groups collection.
    pub groups: String,
    /// SCIM roles collection.
    pub roles: String,
    /// Identity provider management collection.
    pub identity_providers: String,
    /// Userstore management collection.
    pub userstores: String,
    /// Local authenticator configuration collection.
    pub local_authenticators: String,
}

impl Endpoints {
    /// Derives the endpoints of a tenant.
    ///
    /// The super tenant is served from the server root; other tenants live
    /// under `/t/{tenant}`.
    #[must_use]
    pub fn for_tenant(server_url: &str, tenant: &str) -> Self {
        let base = server_url.trim_end_matches('/');
        let root = if tenant.is_empty() || tenant == DEFAULT_TENANT {
            base.to_string()
        } else {
            format!("{base}/t/{tenant}")
        };
        Self {
            users: format!("{root}/scim2/Users"),
            groups: format!("{root}/scim2/Groups"),
            roles: format!("{root}/scim2/Roles"),
            identity_providers: format!("{root}/api/server/v1/identity-providers"),
            userstores: format!("{root}/api/server/v1/userstores"),
            local_authenticators: format!("{root}/api/server/v1/configs/authenticators"),
        }
    }
}

//! User resource and create-request payload.

use serde::{Deserialize, Serialize};

use crate::namespace;
use crate::scim::{schemas, Meta, ResourceRef};

/// A user as returned by the SCIM users endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Username, qualified with its userstore for secondary userstores.
    #[serde(default)]
    pub user_name: String,
    /// Structured name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    /// Email addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<Email>>,
    /// Assigned roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<ResourceRef>>,
    /// Group memberships.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ResourceRef>>,
    /// Server metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Attributes not modelled above (extensions, claims).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Returns the userstore this user belongs to.
    #[must_use]
    pub fn userstore(&self) -> &str {
        namespace::userstore_of(&self.user_name)
    }

    /// Returns the first email address as a plain string.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .as_deref()
            .and_then(<[Email]>::first)
            .and_then(Email::address)
    }

    /// Collapses the email list to a single plain address.
    ///
    /// Servers return emails either as strings or as `{value, primary}`
    /// objects; list views only ever show the first one.
    pub fn normalize_emails(&mut self) {
        if self.emails.is_some() {
            let first = self.primary_email().map(str::to_string);
            self.emails = Some(first.map(Email::Plain).into_iter().collect());
        }
    }

    /// Returns the given name, or an empty string.
    #[must_use]
    pub fn given_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.given_name.as_deref())
            .unwrap_or_default()
    }

    /// Returns the family name, or an empty string.
    #[must_use]
    pub fn family_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.family_name.as_deref())
            .unwrap_or_default()
    }
}

/// Structured user name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

/// An email entry in either of the two shapes servers emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Email {
    /// Bare address.
    Plain(String),
    /// Multi-valued attribute entry.
    Complex {
        /// The address.
        #[serde(default)]
        value: Option<String>,
        /// Whether this is the primary address.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        primary: Option<bool>,
        /// Address type (`work`, `home`, ...).
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl Email {
    /// Returns the address, whatever the shape.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Plain(value) => Some(value),
            Self::Complex { value, .. } => value.as_deref(),
        }
    }
}

/// Email entry sent when creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    /// Whether this is the primary address.
    pub primary: bool,
    /// The address.
    pub value: String,
}

/// Enterprise extension attributes used at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseExtension {
    /// `"true"` to email the user a link to set their own password.
    pub ask_password: String,
}

/// Request body for `POST /Users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Message schemas.
    pub schemas: Vec<String>,
    /// Qualified username.
    pub user_name: String,
    /// Structured name.
    pub name: Name,
    /// Email addresses.
    pub emails: Vec<EmailEntry>,
    /// Initial password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    /// Enterprise extension, present for ask-password onboarding.
    #[serde(
        rename = "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enterprise: Option<EnterpriseExtension>,
}

impl CreateUserRequest {
    /// Creates a request for a user in the given userstore.
    #[must_use]
    pub fn new(domain: &str, user_name: &str) -> Self {
        Self {
            schemas: vec![schemas::USER.to_string()],
            user_name: namespace::qualify(domain, user_name),
            name: Name::default(),
            emails: Vec::new(),
            password: None,
            profile_url: None,
            enterprise: None,
        }
    }

    /// Sets the primary email address. Blank addresses are ignored.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        if !email.trim().is_empty() {
            self.emails = vec![EmailEntry {
                primary: true,
                value: email.trim().to_string(),
            }];
        }
        self
    }

    /// Sets the structured name. Blank parts are omitted.
    #[must_use]
    pub fn with_name(mut self, given_name: &str, family_name: &str) -> Self {
        self.name = Name {
            given_name: non_blank(given_name),
            family_name: non_blank(family_name),
        };
        self
    }

    /// Sets the initial password. Blank passwords are omitted.
    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = non_blank(password);
        self
    }

    /// Sets the profile URL. Blank URLs are omitted.
    #[must_use]
    pub fn with_profile_url(mut self, url: &str) -> Self {
        self.profile_url = non_blank(url);
        self
    }

    /// Asks the server to let the user pick their own password.
    #[must_use]
    pub fn ask_password(mut self) -> Self {
        self.schemas.push(schemas::ENTERPRISE_USER.to_string());
        self.enterprise = Some(EnterpriseExtension {
            ask_password: "true".to_string(),
        });
        self
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

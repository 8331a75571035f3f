//! Userstore qualification and reserved namespaces.
//!
//! Identifiers from secondary userstores are qualified as `DOMAIN/name`.
//! Names from the primary userstore carry no prefix. Roles and groups that
//! live in the `Internal/` or `Application/` namespaces are server-managed and
//! hidden from end-user lists.

/// Name of the primary userstore as reported by the server.
pub const PRIMARY_DOMAIN: &str = "PRIMARY";

/// Namespace of internal roles.
pub const INTERNAL_DOMAIN: &str = "Internal";

/// Namespace of application roles.
pub const APPLICATION_DOMAIN: &str = "Application";

/// Default name of the userstore holding consumer (end-user) accounts.
pub const CONSUMER_USERSTORE: &str = "CONSUMER";

/// Name prefixes of server-managed roles and groups.
pub const RESERVED_PREFIXES: [&str; 2] = ["Application/", "Internal/"];

/// Returns true when `name` belongs to a reserved namespace.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| name.contains(prefix))
}

/// Returns true when `name` belongs to the application namespace.
#[must_use]
pub fn is_application(name: &str) -> bool {
    name.contains(RESERVED_PREFIXES[0])
}

/// Returns true when `domain` designates the primary userstore.
///
/// A blank domain is treated as primary.
#[must_use]
pub fn is_primary(domain: &str) -> bool {
    let domain = domain.trim();
    domain.is_empty() || domain.eq_ignore_ascii_case(PRIMARY_DOMAIN)
}

/// Qualifies a name with its userstore: `domain/name` for secondary
/// userstores, `name` unchanged for the primary one.
#[must_use]
pub fn qualify(domain: &str, name: &str) -> String {
    if is_primary(domain) {
        name.to_string()
    } else {
        format!("{}/{}", domain.trim(), name)
    }
}

/// Returns the userstore part of a possibly qualified name.
#[must_use]
pub fn userstore_of(name: &str) -> &str {
    match name.split_once('/') {
        Some((domain, _)) => domain,
        None => PRIMARY_DOMAIN,
    }
}

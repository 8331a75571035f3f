//! # ic-model
//!
//! Resource types exchanged with the identity server's REST API.
//!
//! This crate provides:
//! - SCIM envelopes (list responses, search and patch requests)
//! - User, group and role resources with their create-request payloads
//! - Identity provider and userstore representations
//! - Userstore/namespace naming rules shared by the fetcher and the importer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod group;
pub mod idp;
pub mod namespace;
pub mod role;
pub mod scim;
pub mod user;
pub mod userstore;

pub use group::{CreateGroupRequest, Group};
pub use idp::{IdentityProvider, IdentityProviderList};
pub use role::{CreateRoleRequest, Role};
pub use scim::{ListResponse, Meta, PatchRequest, ResourceRef, SearchRequest};
pub use user::{CreateUserRequest, User};
pub use userstore::{UserstoreDetail, UserstoreSummary};

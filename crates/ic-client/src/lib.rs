//! # ic-client
//!
//! HTTP access to the identity server for the identity console.
//!
//! This crate provides:
//! - An explicit [`ConsoleContext`] carrying server, tenant and credentials
//! - [`ApiClient`], a thin `reqwest` wrapper with status checking
//! - Typed endpoint functions under [`api`] returning raw server envelopes
//! - The record fetcher ([`fetch`]) that normalizes lists for display
//! - The over-fetch-by-one pagination shim ([`paging`])
//! - A single error classification used by every call site ([`classify`])

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod fetch;
pub mod notice;
pub mod paging;

pub use client::ApiClient;
pub use context::{ConsoleContext, Credentials, Endpoints};
pub use error::{ClientError, ClientResult};
pub use fetch::{ListView, RecordFetcher, RoleScope, UserQuery};
pub use notice::{classify, AlertLevel, Notice, Operation};
pub use paging::{Page, PageRequest};

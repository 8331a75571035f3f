//! End-to-end tests of the identity console.
//!
//! Each test runs the console's client stack against a wiremock server that
//! plays the identity server's SCIM and management endpoints.

mod common;
mod error_handling;
mod export;
mod fetch;
mod idp;
mod import;

//! Typed endpoint functions.
//!
//! Each function issues exactly one request and returns the server's envelope
//! unfiltered. Display-oriented normalization lives in [`crate::fetch`].

pub mod groups;
pub mod idp;
pub mod roles;
pub mod users;
pub mod userstores;

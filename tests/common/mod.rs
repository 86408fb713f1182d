//! Common test utilities and helpers
//!
//! - Token minting for a fake backend
//! - Wiremock helpers and canned payloads
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;

pub use auth_helpers::*;
pub use mock_server::*;

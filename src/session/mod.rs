//! Session Module
//!
//! Owns the authentication lifecycle of the console:
//!
//! - **`token_store`** - Where the bearer token is persisted (file or memory)
//! - **`claims`** - Reads the subject id out of a token (never verified)
//! - **`state`** - The session record and its shared read handle
//! - **`manager`** - Startup resolution, login and logout
//!
//! # State Machine
//!
//! ```text
//! Loading ──initialize()──▶ Ready(user | none)
//!                               │  ▲
//!                      login()  │  │ logout() / 401
//!                               ▼  │
//!                          Ready(user)
//! ```
//!
//! Only the [`SessionManager`] and the 401 handler in
//! [`crate::client::middleware`] write session state or the token store.
//! Everything else reads through [`SessionStore`].

pub mod claims;
pub mod error;
pub mod manager;
pub mod state;
pub mod token_store;

pub use claims::{decode_claims, TokenClaims};
pub use error::{SessionError, StorageError, TokenError};
pub use manager::SessionManager;
pub use state::{LoadState, Session, SessionStore};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

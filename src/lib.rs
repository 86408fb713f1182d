//! KinesioPro Console - Main Library
//!
//! Client-side core of the KinesioPro administrative console: a thin layer
//! over the KinesioPro REST backend, which owns scheduling rules, conflict
//! detection, authorization and persistence.
//!
//! # Module Structure
//!
//! - **`client`** - HTTP client with an explicit middleware chain (bearer
//!   token injection, 401 handling), a generic CRUD service and the
//!   auth/appointment/clinical/report endpoints
//! - **`session`** - Token persistence, claims decoding and the session
//!   state machine (`Loading` → `Ready`)
//! - **`routing`** - Screen table, navigation, primary-role menus and the
//!   route guard
//! - **`shared`** - Clinic records, form error mapping, configuration
//! - **`services`** - One-shot wiring of all of the above
//! - **`egui_app`** - The native console shell (egui/eframe)
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kinesiopro::services::Services;
//! use kinesiopro::session::MemoryTokenStore;
//! use kinesiopro::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let services = Services::new(config, Arc::new(MemoryTokenStore::new()))?;
//! services.session.initialize().await;
//! let decision = services.guard().check();
//! # let _ = decision;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Network calls are async (tokio + reqwest). Session and router state sit
//! behind short-held std locks so the UI thread can read them every frame;
//! session transitions are serialized by an async lock in the manager.

/// Backend API client
pub mod client;

/// Authentication session lifecycle
pub mod session;

/// Navigation, role menus and route guard
pub mod routing;

/// Shared types and configuration
pub mod shared;

/// Service wiring
pub mod services;

/// egui native console
pub mod egui_app;

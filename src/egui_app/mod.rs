//! egui Native Console Module
//!
//! Desktop front end for the clinic backend, built on egui/eframe.
//!
//! # Architecture
//!
//! - **`config`** - Configuration wrapper and token file location
//! - **`types`** - Forms and the events background tasks report
//! - **`state`** - [`AppState`]: services, tokio runtime, event channel, view data
//! - **`views`** - Screens, each drawn only after the route guard allows it
//! - **`debug`** - In-app activity log mirrored to `tracing`
//! - **`theme`** - Palette and frame builders
//!
//! Network calls never run on the UI thread. Each action spawns a task on
//! the runtime; the task sends an [`AppEvent`] back, and
//! [`AppState::poll_events`] applies it on the next frame.

pub mod config;
pub mod debug;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

pub use config::Config;
pub use debug::{DebugCategory, DebugLevel, DebugLogger};
pub use state::AppState;
pub use types::{AppEvent, FormFailure, StartupError};

//! Theme Module
//!
//! Palette and frame builders for the console.
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_SECONDARY, "Sin turnos");
//! });
//! ```

pub mod colors;
pub mod styles;

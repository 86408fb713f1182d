//! Console Color Palette
//!
//! Teal on warm white, matching the clinic's printed material.

use eframe::egui::Color32;

/// Side menu background
pub const SIDEBAR_BG: Color32 = Color32::from_rgb(0x12, 0x3B, 0x3F);

/// Highlighted menu entry
pub const SIDEBAR_ACTIVE: Color32 = Color32::from_rgb(0x1F, 0x5C, 0x61);

/// Hovered menu entry and widgets
pub const HOVER_ITEM: Color32 = Color32::from_rgb(0x2A, 0x70, 0x75);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x0E, 0x2F, 0x32);

/// Main content background
pub const CONTENT_BG: Color32 = Color32::from_rgb(0xF8, 0xF6, 0xF1);

/// Cards, calendar cells and form backgrounds
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

pub const CARD_BORDER: Color32 = Color32::from_rgb(0xD9, 0xD4, 0xC8);

pub const INPUT_BG: Color32 = Color32::from_rgb(0xEE, 0xEA, 0xE1);

pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEC, 0xF4, 0xF4);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1D, 0x26, 0x27);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x6B, 0x76, 0x77);

pub const ACCENT: Color32 = Color32::from_rgb(0x1F, 0x8A, 0x8A);

pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Calendar chip tint for an appointment status
pub fn status_color(estado: &str) -> Color32 {
    match estado.to_lowercase().as_str() {
        "confirmado" => SUCCESS,
        "cancelado" | "ausente" => ERROR,
        "llego_tarde" | "llegó tarde" | "tarde" => WARNING,
        _ => ACCENT,
    }
}

use eframe::egui;

use crate::egui_app::debug::{DebugCategory, DebugLevel};
use crate::egui_app::state::AppState;

pub fn render_debug_panel(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.strong("Actividad");
        ui.label(format!("{} eventos", state.debug_logger.count()));

        if ui.button("Limpiar").clicked() {
            state.debug_logger.clear();
        }

        ui.separator();

        if ui
            .selectable_label(state.debug_filter_category.is_none(), "Todo")
            .clicked()
        {
            state.debug_filter_category = None;
        }
        for category in DebugCategory::ALL {
            let selected = state.debug_filter_category == Some(category);
            if ui.selectable_label(selected, category.to_string()).clicked() {
                state.debug_filter_category = Some(category);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let errors = state.debug_logger.count_by_level(DebugLevel::Error);
            let warns = state.debug_logger.count_by_level(DebugLevel::Warn);
            ui.colored_label(egui::Color32::RED, format!("Errores: {}", errors));
            ui.colored_label(egui::Color32::from_rgb(0xC0, 0x80, 0x00), format!("Avisos: {}", warns));
        });
    });

    ui.separator();

    let entries = match state.debug_filter_category {
        Some(category) => state.debug_logger.get_entries_by_category(category),
        None => state.debug_logger.get_entries(),
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .max_height(220.0)
        .show(ui, |ui| {
            for entry in entries.iter().rev().take(200) {
                let color = match entry.level {
                    DebugLevel::Error => egui::Color32::RED,
                    DebugLevel::Warn => egui::Color32::from_rgb(0xC0, 0x80, 0x00),
                    DebugLevel::Info => egui::Color32::DARK_GREEN,
                    DebugLevel::Debug => egui::Color32::GRAY,
                };
                ui.colored_label(color, egui::RichText::new(entry.to_string()).monospace());
            }
        });
}

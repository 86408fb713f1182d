//! Role dashboard and profile screen

use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::routing::{menu_for, PrimaryRole, Route};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(user) = state.services.store().user() else {
        return;
    };
    let role = state.primary_role();

    ui.heading(format!("Hola, {}", user.nombre));
    ui.colored_label(
        colors::TEXT_SECONDARY,
        match role {
            Some(role) => format!("Ingresaste como {}", role),
            None => "Tu usuario no tiene un rol asignado todavía.".to_string(),
        },
    );
    ui.add_space(16.0);

    let Some(role) = role else {
        return;
    };

    ui.horizontal_wrapped(|ui| {
        for route in menu_for(role).iter().filter(|r| **r != Route::Dashboard) {
            styles::card_frame().show(ui, |ui| {
                ui.set_min_size(egui::vec2(160.0, 60.0));
                if ui.link(egui::RichText::new(route.title()).size(16.0)).clicked() {
                    state.services.router.navigate(*route);
                }
            });
        }
    });

    if matches!(role, PrimaryRole::Admin | PrimaryRole::Recepcionista) {
        ui.add_space(24.0);
        ui.separator();
        ui.strong("Reportes");
        ui.horizontal(|ui| {
            let week = state.appointments.week_start;
            ui.label(format!("Semana del {}", week.format("%d/%m/%Y")));
            if ui
                .add_enabled(!state.report_busy, styles::primary_button("Descargar turnos (PDF)"))
                .clicked()
            {
                state.download_week_report();
            }
        });
    }
}

pub fn render_profile(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(user) = state.services.store().user() else {
        return;
    };
    ui.heading("Mi perfil");
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        egui::Grid::new("profile")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "Nombre");
                ui.label(user.display_name());
                ui.end_row();

                ui.colored_label(colors::TEXT_SECONDARY, "Email");
                ui.label(&user.email);
                ui.end_row();

                ui.colored_label(colors::TEXT_SECONDARY, "Roles");
                ui.label(user.role_names().join(", "));
                ui.end_row();
            });
    });
}

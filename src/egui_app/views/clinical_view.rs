use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::routing::PrimaryRole;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Historias clínicas");
    ui.add_space(8.0);

    let is_patient = state.primary_role() == Some(PrimaryRole::Paciente);
    ui.horizontal(|ui| {
        if !is_patient {
            ui.label("Paciente Nº");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.timeline.patient_input).desired_width(80.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                state.load_timeline();
            }
        }
        if ui.button(if is_patient { "Actualizar" } else { "Buscar" }).clicked() {
            state.load_timeline();
        }
        if state.timeline.loading {
            ui.spinner();
        }
    });
    ui.add_space(8.0);

    if let Some(error) = &state.timeline.error {
        ui.colored_label(colors::ERROR, error);
        return;
    }
    if state.timeline.groups.is_empty() {
        if !state.timeline.loading {
            ui.colored_label(colors::TEXT_SECONDARY, "Sin registros para mostrar.");
        }
        return;
    }

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        for group in &state.timeline.groups {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(group.label()).strong().color(colors::ACCENT));
            for record in &group.records {
                styles::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.strong(record.fecha_consulta.format("%d/%m/%Y").to_string());
                        if let Some(motivo) = &record.motivo_consulta {
                            ui.label(motivo);
                        }
                    });
                    if let Some(diagnostico) = &record.diagnostico {
                        ui.label(format!("Diagnóstico: {}", diagnostico));
                    }
                    if let Some(tratamiento) = &record.tratamiento {
                        ui.label(format!("Tratamiento: {}", tratamiento));
                    }
                    if let Some(evolucion) = &record.evolucion {
                        ui.label(format!("Evolución: {}", evolucion));
                    }
                    if let Some(notas) = &record.observaciones {
                        ui.colored_label(colors::TEXT_SECONDARY, notas);
                    }
                });
            }
        }
    });
}

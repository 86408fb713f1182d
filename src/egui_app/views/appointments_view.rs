use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::routing::PrimaryRole;

#[derive(Debug, Clone, Copy)]
enum Action {
    Confirm,
    Cancel,
    Late,
    Absent,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    week_header(ui, state, "Turnos");

    if let Some(error) = &state.appointments.error {
        ui.colored_label(colors::ERROR, error);
        return;
    }

    // Patients see their bookings; status changes are for staff.
    let can_act = !matches!(state.primary_role(), Some(PrimaryRole::Paciente) | None);
    let mut items: Vec<_> = state.appointments.items.iter().collect();
    items.sort_by_key(|a| (a.fecha, a.hora_inicio, a.id));

    if items.is_empty() && !state.appointments.loading {
        ui.colored_label(colors::TEXT_SECONDARY, "No hay turnos esta semana.");
        return;
    }

    let mut pending: Option<(i64, Action)> = None;
    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        egui::Grid::new("appointments")
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in ["Fecha", "Hora", "Paciente", "Kinesiólogo", "Estado"] {
                    ui.strong(header);
                }
                ui.end_row();

                for appointment in &items {
                    ui.label(appointment.fecha.format("%d/%m/%Y").to_string());
                    ui.label(appointment.hora_inicio.format("%H:%M").to_string());
                    ui.label(
                        appointment
                            .paciente_nombre
                            .clone()
                            .unwrap_or_else(|| format!("#{}", appointment.paciente_id)),
                    );
                    ui.label(
                        appointment
                            .kinesiologo_nombre
                            .clone()
                            .unwrap_or_else(|| format!("#{}", appointment.kinesiologo_id)),
                    );
                    ui.colored_label(colors::status_color(&appointment.estado), &appointment.estado);

                    if can_act {
                        ui.horizontal(|ui| {
                            for (label, action) in [
                                ("Confirmar", Action::Confirm),
                                ("Cancelar", Action::Cancel),
                                ("Llegó tarde", Action::Late),
                                ("Ausente", Action::Absent),
                            ] {
                                if ui.small_button(label).clicked() {
                                    pending = Some((appointment.id, action));
                                }
                            }
                        });
                    }
                    ui.end_row();
                }
            });
    });

    if let Some((id, action)) = pending {
        match action {
            Action::Confirm => state.confirm_appointment(id),
            Action::Cancel => state.cancel_appointment(id),
            Action::Late => state.mark_late(id),
            Action::Absent => state.mark_absent(id),
        }
    }
}

/// Title with previous/next week navigation, shared with the calendar.
pub fn week_header(ui: &mut egui::Ui, state: &mut AppState, title: &str) {
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.add_space(16.0);
        if ui.button("◀").clicked() {
            state.shift_week(-1);
        }
        let start = state.appointments.week_start;
        let end = start + chrono::Duration::days(6);
        ui.label(format!("{} - {}", start.format("%d/%m"), end.format("%d/%m/%Y")));
        if ui.button("▶").clicked() {
            state.shift_week(1);
        }
        if ui.button("Actualizar").clicked() {
            state.load_week();
        }
        if state.appointments.loading {
            ui.spinner();
        }
    });
    ui.add_space(8.0);
}

//! Week calendar with drag-to-reschedule
//!
//! Each cell is a drop zone for one day and hour. Dragging a chip onto a
//! cell asks the backend to move the appointment there; the backend has
//! the last word on conflicts.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::appointments_view::week_header;
use crate::shared::clinic::group_by_day;

/// First and last hour rows shown
const FIRST_HOUR: u32 = 7;
const LAST_HOUR: u32 = 21;

const DAY_NAMES: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    week_header(ui, state, "Calendario");

    if let Some(error) = &state.appointments.error {
        ui.colored_label(colors::ERROR, error);
        return;
    }

    let monday = state.appointments.week_start;
    let days = group_by_day(&state.appointments.items, monday);
    let mut dropped: Option<(i64, NaiveDate, u32)> = None;

    egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
        egui::Grid::new("week_calendar")
            .spacing([2.0, 2.0])
            .min_col_width(120.0)
            .show(ui, |ui| {
                ui.label("");
                for (offset, name) in DAY_NAMES.iter().enumerate() {
                    let date = monday + Duration::days(offset as i64);
                    ui.strong(format!("{} {}", name, date.format("%d/%m")));
                }
                ui.end_row();

                for hour in FIRST_HOUR..=LAST_HOUR {
                    ui.colored_label(colors::TEXT_SECONDARY, format!("{:02}:00", hour));
                    for (date, bucket) in &days {
                        let (_, payload) = ui.dnd_drop_zone::<i64, ()>(styles::slot_frame(), |ui| {
                            ui.set_min_size(egui::vec2(120.0, 30.0));
                            for appointment in bucket.iter().filter(|a| a.hora_inicio.hour() == hour) {
                                let id = egui::Id::new(("turno", appointment.id));
                                ui.dnd_drag_source(id, appointment.id, |ui| {
                                    ui.label(
                                        egui::RichText::new(appointment.label())
                                            .color(colors::status_color(&appointment.estado)),
                                    );
                                });
                            }
                        });
                        if let Some(id) = payload {
                            dropped = Some((*id, *date, hour));
                        }
                    }
                    ui.end_row();
                }
            });
    });

    // Moving to another hour keeps the minutes past the hour.
    if let Some((id, date, hour)) = dropped {
        let minute = state
            .appointments
            .items
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.hora_inicio.minute())
            .unwrap_or(0);
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            state.reschedule(id, date, time);
        }
    }
}

//! Generic table for a backend collection
//!
//! Rows are shown as raw JSON objects: columns come from the keys of the
//! first row, `id` first, nested values rendered compactly.

use eframe::egui;
use serde_json::Value;

use crate::egui_app::state::{row_id, AppState};
use crate::egui_app::theme::colors;
use crate::shared::Resource;

const MAX_COLUMNS: usize = 7;

pub fn render(ui: &mut egui::Ui, state: &mut AppState, resource: Resource) {
    ui.horizontal(|ui| {
        ui.heading(resource.label());
        if ui.button("Actualizar").clicked() {
            state.load_table(resource);
        }
    });
    ui.add_space(8.0);

    let Some(table) = state.tables.get(&resource) else {
        return;
    };
    if let Some(error) = &table.error {
        ui.colored_label(colors::ERROR, error);
        return;
    }
    if table.rows.is_empty() {
        if !table.loading {
            ui.colored_label(colors::TEXT_SECONDARY, "No hay registros.");
        }
        return;
    }

    let columns = columns_for(&table.rows);
    let mut remove: Option<String> = None;

    egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
        egui::Grid::new(("table", resource.base_path()))
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for column in &columns {
                    ui.strong(column);
                }
                ui.label("");
                ui.end_row();

                for row in &table.rows {
                    for column in &columns {
                        ui.label(cell_text(row.get(column.as_str())));
                    }
                    match row_id(row) {
                        Some(id) => {
                            if ui.small_button("Eliminar").clicked() {
                                remove = Some(id);
                            }
                        }
                        None => {
                            ui.label("");
                        }
                    }
                    ui.end_row();
                }
            });
    });

    if let Some(id) = remove {
        state.remove_row(resource, id);
    }
}

/// Column keys: `id` first, then the first row's keys in order.
pub fn columns_for(rows: &[Value]) -> Vec<String> {
    let Some(Value::Object(first)) = rows.first() else {
        return Vec::new();
    };
    let mut columns: Vec<String> = Vec::with_capacity(MAX_COLUMNS);
    if first.contains_key("id") {
        columns.push("id".to_string());
    }
    columns.extend(
        first
            .keys()
            .filter(|k| k.as_str() != "id")
            .cloned()
            .take(MAX_COLUMNS.saturating_sub(columns.len())),
    );
    columns
}

pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "Sí".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map
                    .get("nombre")
                    .map(|v| cell_text(Some(v)))
                    .unwrap_or_else(|| item.to_string()),
                other => cell_text(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

use eframe::egui;

use crate::egui_app::state::{route_resource, AppState};
use crate::egui_app::theme::{colors, styles};
use crate::routing::{menu_for, GuardDecision, Route};

pub mod appointments_view;
pub mod auth_view;
pub mod calendar_view;
pub mod clinical_view;
pub mod dashboard_view;
pub mod debug_view;
pub mod resource_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("KinesioPro").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Actividad").clicked() {
                        state.debug_view_expanded = !state.debug_view_expanded;
                    }
                    ui.add_space(16.0);

                    if let Some(user) = state.services.store().user() {
                        if ui.button("Cerrar sesión").clicked() {
                            state.logout();
                        }
                        let role = state
                            .primary_role()
                            .map(|r| format!(" ({})", r))
                            .unwrap_or_default();
                        ui.colored_label(colors::TEXT_LIGHT, format!("{}{}", user.display_name(), role));
                    }

                    if state.is_busy() {
                        ui.spinner();
                    }
                });
            });
        });
}

/// Role menu; only drawn for signed-in users.
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.services.store().is_authenticated() {
        return;
    }
    let entries: &[Route] = match state.primary_role() {
        Some(role) => menu_for(role),
        None => &[Route::Dashboard, Route::Profile],
    };
    let current = state.services.router.current();

    egui::SidePanel::left("menu")
        .resizable(false)
        .exact_width(190.0)
        .frame(styles::sidebar_frame())
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;
            for route in entries {
                let text = egui::RichText::new(route.title()).color(colors::TEXT_LIGHT);
                if ui.selectable_label(current == *route, text).clicked() {
                    state.services.router.navigate(*route);
                }
            }
        });
}

pub fn render_debug_panel(ctx: &egui::Context, state: &mut AppState) {
    if !state.debug_view_expanded {
        return;
    }
    egui::TopBottomPanel::bottom("activity_panel")
        .resizable(true)
        .show(ctx, |ui| debug_view::render_debug_panel(ui, state));
}

/// Main area: every screen goes through the route guard first.
pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::content_frame())
        .show(ctx, |ui| {
            match state.services.guard().check() {
                GuardDecision::Pending => {
                    ui.centered_and_justified(|ui| ui.spinner());
                    return;
                }
                GuardDecision::Redirect(to) => {
                    state.debug_logger.debug(
                        crate::egui_app::DebugCategory::Routing,
                        format!("Guard redirected to {}", to),
                    );
                    // Draw the target on the next frame.
                    ctx.request_repaint();
                    return;
                }
                GuardDecision::Allow => {}
            }

            let route = state.services.router.current();
            state.enter_route(route);

            if let Some(notice) = state.notice.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, notice);
                    if ui.small_button("✕").clicked() {
                        state.notice = None;
                    }
                });
                ui.separator();
            }

            if let Some(resource) = route_resource(route) {
                resource_view::render(ui, state, resource);
                return;
            }
            match route {
                Route::Login | Route::Register => auth_view::render(ui, state),
                Route::Appointments => appointments_view::render(ui, state),
                Route::Calendar => calendar_view::render(ui, state),
                Route::ClinicalRecords => clinical_view::render(ui, state),
                Route::Profile => dashboard_view::render_profile(ui, state),
                _ => dashboard_view::render(ui, state),
            }
        });
}

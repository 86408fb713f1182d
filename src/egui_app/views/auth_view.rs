use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::FormErrors;
use crate::routing::Route;

const INPUT_WIDTH: f32 = 280.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let registering = state.services.router.current() == Route::Register;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new("KinesioPro")
                .size(32.0)
                .strong()
                .color(colors::ACCENT),
        );
        ui.add_space(16.0);

        styles::card_frame().show(ui, |ui| {
            ui.set_max_width(INPUT_WIDTH + 40.0);
            ui.label(
                egui::RichText::new(if registering { "Crear cuenta" } else { "Iniciar sesión" })
                    .size(22.0)
                    .color(colors::TEXT_PRIMARY),
            );
            ui.add_space(12.0);

            if registering {
                register_fields(ui, state);
            } else {
                login_fields(ui, state);
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                let submit = if registering { "Registrarme" } else { "Ingresar" };
                let enabled = !state.auth_busy;
                if ui
                    .add_enabled(enabled, styles::primary_button(submit))
                    .clicked()
                {
                    if registering {
                        state.handle_register();
                    } else {
                        state.handle_login();
                    }
                }

                let switch = if registering { "Ya tengo cuenta" } else { "Crear una cuenta" };
                if ui.link(switch).clicked() {
                    let target = if registering { Route::Login } else { Route::Register };
                    state.services.router.navigate(target);
                }

                if state.auth_busy {
                    ui.spinner();
                }
            });
        });
    });
}

fn login_fields(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.login_form;
    general_error(ui, &form.errors);
    let submitted = text_field(ui, "Email", &mut form.email, false, form.errors.field("email"))
        | text_field(ui, "Contraseña", &mut form.password, true, form.errors.field("password"));
    if submitted {
        state.handle_login();
    }
}

fn register_fields(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.register_form;
    general_error(ui, &form.errors);
    let errors = form.errors.clone();
    text_field(ui, "Nombre", &mut form.nombre, false, errors.field("nombre"));
    text_field(ui, "Apellido", &mut form.apellido, false, errors.field("apellido"));
    text_field(ui, "Email", &mut form.email, false, errors.field("email"));
    text_field(ui, "Contraseña", &mut form.password, true, errors.field("password"));
    text_field(ui, "DNI (opcional)", &mut form.dni, false, errors.field("dni"));
    text_field(ui, "Teléfono (opcional)", &mut form.telefono, false, errors.field("telefono"));
}

fn general_error(ui: &mut egui::Ui, errors: &FormErrors) {
    if let Some(message) = &errors.general {
        ui.colored_label(colors::ERROR, message);
        ui.add_space(8.0);
    }
}

/// Labeled input with its error underneath. Returns true when Enter was pressed.
fn text_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    password: bool,
    error: Option<&str>,
) -> bool {
    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
    let response = ui.add_sized(
        [INPUT_WIDTH, 28.0],
        egui::TextEdit::singleline(value).password(password),
    );
    if let Some(error) = error {
        ui.colored_label(colors::ERROR, error);
    }
    ui.add_space(6.0);
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::client::ApiError;
use crate::egui_app::types::{
    AppEvent, FormFailure, LoginForm, RegisterForm, StartupError, LOGIN_FIELDS, REGISTER_FIELDS,
};
use crate::egui_app::{Config, DebugCategory, DebugLogger};
use crate::routing::{PrimaryRole, Route};
use crate::services::Services;
use crate::shared::clinic::{reschedule_target, week_bounds, TimelineGroup};
use crate::shared::{Appointment, Resource};

/// Rows and status of one generic resource table
#[derive(Debug, Default)]
pub struct TableState {
    pub rows: Vec<Value>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Appointment list and week calendar data
#[derive(Debug)]
pub struct AppointmentsState {
    pub items: Vec<Appointment>,
    pub week_start: NaiveDate,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppointmentsState {
    fn new(today: NaiveDate) -> Self {
        Self {
            items: Vec::new(),
            week_start: week_bounds(today).0,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TimelineState {
    pub patient_input: String,
    pub groups: Vec<TimelineGroup>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub services: Services,
    runtime: Runtime,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    repaint: Option<egui::Context>,

    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub auth_busy: bool,
    pub notice: Option<String>,

    pub tables: HashMap<Resource, TableState>,
    pub appointments: AppointmentsState,
    pub timeline: TimelineState,
    pub report_busy: bool,
    entered_route: Option<Route>,

    pub debug_logger: DebugLogger,
    pub debug_view_expanded: bool,
    pub debug_filter_category: Option<DebugCategory>,
}

impl AppState {
    /// Wire services. The persisted session is resolved once a context
    /// is attached, see [`AppState::attach_context`].
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let tokens = config.token_store()?;
        let services = Services::new(config.app().clone(), tokens)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (events_tx, events_rx) = channel();

        let debug_logger = DebugLogger::new(500);
        debug_logger.info(
            DebugCategory::Session,
            format!("Console started against {}", config.server_url()),
        );

        Ok(Self {
            config,
            services,
            runtime,
            events_tx,
            events_rx,
            repaint: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            auth_busy: false,
            notice: None,
            tables: HashMap::new(),
            appointments: AppointmentsState::new(Local::now().date_naive()),
            timeline: TimelineState::default(),
            report_busy: false,
            entered_route: None,
            debug_logger,
            debug_view_expanded: false,
            debug_filter_category: None,
        })
    }

    /// Lets background tasks wake the UI when they finish.
    ///
    /// The first call also starts resolving the persisted session, so its
    /// result repaints the window.
    pub fn attach_context(&mut self, ctx: &egui::Context) {
        if self.repaint.is_some() {
            return;
        }
        self.repaint = Some(ctx.clone());
        let session = self.services.session.clone();
        self.spawn(async move { AppEvent::SessionResolved(session.initialize().await) });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            // Receiver only goes away when the window closes.
            let _ = tx.send(event);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn primary_role(&self) -> Option<PrimaryRole> {
        self.services.session.primary_role()
    }

    pub fn is_busy(&self) -> bool {
        self.auth_busy
            || self.report_busy
            || self.appointments.loading
            || self.timeline.loading
            || self.tables.values().any(|t| t.loading)
    }

    /// Drain finished background tasks into the view state.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionResolved(Some(user)) => {
                self.debug_logger.info(
                    DebugCategory::Session,
                    format!("Session restored for {}", user.email),
                );
            }
            AppEvent::SessionResolved(None) => {
                self.debug_logger
                    .info(DebugCategory::Session, "No usable session, signed out");
            }
            AppEvent::LoginFinished(result) | AppEvent::RegisterFinished(result) => {
                self.auth_busy = false;
                match result {
                    Ok(user) => {
                        self.debug_logger
                            .info(DebugCategory::Auth, format!("Signed in as {}", user.email));
                        self.login_form = LoginForm::default();
                        self.register_form = RegisterForm::default();
                        self.services.router.navigate(Route::Dashboard);
                    }
                    Err(failure) => {
                        self.debug_logger
                            .warn(DebugCategory::Auth, format!("Sign-in failed: {}", failure.message));
                        match self.services.router.current() {
                            Route::Register => self.register_form.errors.apply(failure),
                            _ => self.login_form.errors.apply(failure),
                        }
                    }
                }
            }
            AppEvent::TableLoaded(resource, result) => {
                let table = self.tables.entry(resource).or_default();
                table.loading = false;
                match result {
                    Ok(rows) => {
                        table.rows = rows;
                        table.error = None;
                    }
                    Err(e) => {
                        table.error = Some(e.user_message());
                        self.log_api_error(&format!("Loading {}", resource), &e);
                    }
                }
            }
            AppEvent::ItemRemoved(resource, result) => match result {
                Ok(id) => {
                    if let Some(table) = self.tables.get_mut(&resource) {
                        table.rows.retain(|row| row_id(row).as_deref() != Some(id.as_str()));
                    }
                    self.notice = Some(format!("{}: registro {} eliminado", resource, id));
                }
                Err(e) => {
                    self.notice = Some(e.user_message());
                    self.log_api_error(&format!("Deleting from {}", resource), &e);
                }
            },
            AppEvent::AppointmentsLoaded(result) => {
                self.appointments.loading = false;
                match result {
                    Ok(items) => {
                        self.appointments.items = items;
                        self.appointments.error = None;
                    }
                    Err(e) => {
                        self.appointments.error = Some(e.user_message());
                        self.log_api_error("Loading appointments", &e);
                    }
                }
            }
            AppEvent::AppointmentUpdated(result) => match result {
                Ok(updated) => {
                    self.debug_logger.info(
                        DebugCategory::Network,
                        format!("Turno {} is now {}", updated.id, updated.estado),
                    );
                    match self.appointments.items.iter_mut().find(|a| a.id == updated.id) {
                        Some(existing) => *existing = updated,
                        None => self.appointments.items.push(updated),
                    }
                }
                Err(e) => {
                    self.notice = Some(e.user_message());
                    self.log_api_error("Updating appointment", &e);
                }
            },
            AppEvent::TimelineLoaded(result) => {
                self.timeline.loading = false;
                match result {
                    Ok(groups) => {
                        self.timeline.groups = groups;
                        self.timeline.error = None;
                    }
                    Err(e) => {
                        self.timeline.error = Some(e.user_message());
                        self.log_api_error("Loading clinical records", &e);
                    }
                }
            }
            AppEvent::ReportSaved(result) => {
                self.report_busy = false;
                match result {
                    Ok(path) => {
                        self.notice = Some(format!("Reporte guardado en {}", path.display()));
                        self.debug_logger
                            .info(DebugCategory::Network, format!("Report saved to {}", path.display()));
                    }
                    Err(message) => {
                        self.debug_logger.error(DebugCategory::Network, message.clone());
                        self.notice = Some(message);
                    }
                }
            }
        }
    }

    fn log_api_error(&self, what: &str, error: &ApiError) {
        self.debug_logger
            .error(DebugCategory::Network, format!("{} failed: {}", what, error));
    }

    pub fn handle_login(&mut self) {
        if self.auth_busy {
            return;
        }
        self.login_form.errors.clear();
        let credentials = self.login_form.credentials();
        if credentials.email.is_empty() || credentials.password.is_empty() {
            self.login_form.errors.general = Some("Completá email y contraseña.".to_string());
            return;
        }

        self.auth_busy = true;
        self.debug_logger
            .info(DebugCategory::Auth, format!("Signing in {}", credentials.email));
        let session = self.services.session.clone();
        self.spawn(async move {
            let result = match session.auth().login(&credentials).await {
                Ok(reply) => session
                    .login(&reply.access_token)
                    .await
                    .map_err(|e| FormFailure::from_session(&e, LOGIN_FIELDS)),
                Err(e) => Err(FormFailure::from_api(&e, LOGIN_FIELDS)),
            };
            AppEvent::LoginFinished(result)
        });
    }

    /// Create the account, then sign in with the same credentials.
    pub fn handle_register(&mut self) {
        if self.auth_busy {
            return;
        }
        self.register_form.errors.clear();
        let request = self.register_form.request();
        let problems = request.validate();
        if !problems.is_empty() {
            for (field, message) in problems {
                self.register_form
                    .errors
                    .fields
                    .insert(field.to_string(), message.to_string());
            }
            return;
        }

        self.auth_busy = true;
        let session = self.services.session.clone();
        self.spawn(async move {
            let auth = session.auth();
            if let Err(e) = auth.register(&request).await {
                return AppEvent::RegisterFinished(Err(FormFailure::from_api(&e, REGISTER_FIELDS)));
            }
            let credentials = crate::client::Credentials {
                email: request.email.clone(),
                password: request.password.clone(),
            };
            let result = match auth.login(&credentials).await {
                Ok(reply) => session
                    .login(&reply.access_token)
                    .await
                    .map_err(|e| FormFailure::from_session(&e, REGISTER_FIELDS)),
                Err(e) => Err(FormFailure::from_api(&e, REGISTER_FIELDS)),
            };
            AppEvent::RegisterFinished(result)
        });
    }

    pub fn logout(&mut self) {
        self.services.session.logout();
        self.tables.clear();
        self.appointments.items.clear();
        self.timeline = TimelineState::default();
        self.entered_route = None;
        self.notice = None;
        self.debug_logger.info(DebugCategory::Auth, "Signed out");
    }

    /// Called each frame with the screen the guard allowed; loads its data once per visit.
    pub fn enter_route(&mut self, route: Route) {
        if self.entered_route == Some(route) {
            return;
        }
        self.entered_route = Some(route);
        self.debug_logger
            .debug(DebugCategory::Routing, format!("Entered {}", route));

        if let Some(resource) = route_resource(route) {
            self.load_table(resource);
            return;
        }
        match route {
            Route::Appointments | Route::Calendar => self.load_week(),
            Route::ClinicalRecords if self.primary_role() == Some(PrimaryRole::Paciente) => {
                self.load_timeline()
            }
            _ => {}
        }
    }

    pub fn load_table(&mut self, resource: Resource) {
        self.tables.entry(resource).or_default().loading = true;
        let api = self.services.resource::<Value>(resource);
        self.spawn(async move { AppEvent::TableLoaded(resource, api.list(&()).await) });
    }

    pub fn remove_row(&mut self, resource: Resource, id: String) {
        let api = self.services.resource::<Value>(resource);
        self.spawn(async move {
            let result = api.remove(&id).await;
            AppEvent::ItemRemoved(resource, result.map(|()| id))
        });
    }

    pub fn shift_week(&mut self, weeks: i64) {
        self.appointments.week_start += Duration::weeks(weeks);
        self.load_week();
    }

    pub fn load_week(&mut self) {
        self.appointments.loading = true;
        let from = self.appointments.week_start;
        let to = from + Duration::days(6);
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentsLoaded(api.calendar(from, to, None).await) });
    }

    pub fn confirm_appointment(&mut self, id: i64) {
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentUpdated(api.confirm(id).await) });
    }

    pub fn cancel_appointment(&mut self, id: i64) {
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentUpdated(api.cancel(id).await) });
    }

    pub fn mark_late(&mut self, id: i64) {
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentUpdated(api.mark_late(id).await) });
    }

    pub fn mark_absent(&mut self, id: i64) {
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentUpdated(api.mark_absent(id).await) });
    }

    /// Move a dropped appointment; drops onto its own slot are ignored.
    pub fn reschedule(&mut self, id: i64, date: NaiveDate, time: NaiveTime) {
        let Some(appointment) = self.appointments.items.iter().find(|a| a.id == id) else {
            return;
        };
        let Some(patch) = reschedule_target(appointment, date, time) else {
            return;
        };
        self.debug_logger.info(
            DebugCategory::Ui,
            format!("Moving turno {} to {} {}", id, patch.fecha, patch.hora_inicio.format("%H:%M")),
        );
        let api = self.services.appointments();
        self.spawn(async move { AppEvent::AppointmentUpdated(api.reschedule(id, &patch).await) });
    }

    /// Load the timeline for the patient typed in, or every record the
    /// backend lets this user see when the field is empty.
    pub fn load_timeline(&mut self) {
        let input = self.timeline.patient_input.trim().to_string();
        let patient = if input.is_empty() {
            None
        } else {
            match input.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    self.timeline.error = Some("El número de paciente no es válido.".to_string());
                    return;
                }
            }
        };

        self.timeline.loading = true;
        let api = self.services.clinical_records();
        self.spawn(async move {
            let result = match patient {
                Some(id) => api.timeline(id).await,
                None => api
                    .crud()
                    .list(&())
                    .await
                    .map(|records| crate::shared::clinic::clinical_timeline(&records)),
            };
            AppEvent::TimelineLoaded(result)
        });
    }

    /// Fetch the PDF for the visible week and save it to the downloads folder.
    pub fn download_week_report(&mut self) {
        if self.report_busy {
            return;
        }
        self.report_busy = true;
        let from = self.appointments.week_start;
        let to = from + Duration::days(6);
        let api = self.services.reports();
        self.spawn(async move {
            let result = match api.appointments_pdf(from, to).await {
                Ok(bytes) => report_dir()
                    .and_then(|dir| save_report(&dir, &format!("turnos_{}_{}.pdf", from, to), &bytes)),
                Err(e) => Err(e.user_message()),
            };
            AppEvent::ReportSaved(result)
        });
    }
}

fn report_dir() -> Result<PathBuf, String> {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| "No se encontró una carpeta de descargas.".to_string())
}

fn save_report(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .map_err(|e| format!("No se pudo guardar el reporte: {}", e))?;
    Ok(path)
}

/// Collection listed by a plain table screen
pub fn route_resource(route: Route) -> Option<Resource> {
    match route {
        Route::Users => Some(Resource::Users),
        Route::Patients => Some(Resource::Patients),
        Route::Therapists => Some(Resource::Therapists),
        Route::Rooms => Some(Resource::Rooms),
        Route::Services => Some(Resource::Services),
        _ => None,
    }
}

/// `id` of a generic row as text, if it has one
pub fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoadState;
    use crate::shared::AppConfig;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_session_resolves_after_context_attached() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_builder(
            AppConfig::builder()
                .api_base_url("http://127.0.0.1:9")
                .token_file(dir.path().join("token")),
        )
        .unwrap();
        let mut state = AppState::new(config).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(state.services.store().load_state(), LoadState::Loading);

        let ctx = egui::Context::default();
        state.attach_context(&ctx);
        state.attach_context(&ctx);
        for _ in 0..200 {
            state.poll_events();
            if state.debug_logger.count() > 1 {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(state.services.store().load_state(), LoadState::Ready);
        let resolved = state.debug_logger.get_entries_by_category(DebugCategory::Session);
        assert_eq!(resolved.len(), 2);
        assert!(resolved[1].message.contains("signed out"));
    }

    #[test]
    fn test_route_resource() {
        assert_eq!(route_resource(Route::Rooms), Some(Resource::Rooms));
        assert_eq!(route_resource(Route::Calendar), None);
        assert_eq!(route_resource(Route::Login), None);
    }

    #[test]
    fn test_row_id() {
        assert_eq!(row_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(row_id(&json!({"id": "abc"})), Some("abc".to_string()));
        assert_eq!(row_id(&json!({"nombre": "x"})), None);
    }

    #[test]
    fn test_save_report_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(dir.path(), "turnos.pdf", b"%PDF-1.4").unwrap();
        assert_eq!(path, dir.path().join("turnos.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_save_report_missing_dir_is_message() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let err = save_report(&missing, "turnos.pdf", b"x").unwrap_err();
        assert!(err.starts_with("No se pudo guardar el reporte"));
    }
}

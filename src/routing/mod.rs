//! Routing Module
//!
//! Screen navigation for the console: the [`Route`] table, the shared
//! [`Router`] that tracks the current screen, the role-based menu
//! selection in [`roles`], and the [`guard`] that gates protected screens
//! on the session state.
//!
//! Role checks here only choose what to show. The backend enforces
//! authorization on every request.

pub mod guard;
pub mod roles;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

pub use guard::{GuardDecision, RouteGuard};
pub use roles::{menu_for, select_primary_role, PrimaryRole, ROLE_PRIORITY};

/// A console screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Users,
    Patients,
    Therapists,
    Rooms,
    Services,
    Appointments,
    Calendar,
    ClinicalRecords,
    Profile,
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Users,
        Route::Patients,
        Route::Therapists,
        Route::Rooms,
        Route::Services,
        Route::Appointments,
        Route::Calendar,
        Route::ClinicalRecords,
        Route::Profile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::Users => "/usuarios",
            Route::Patients => "/pacientes",
            Route::Therapists => "/kinesiologos",
            Route::Rooms => "/boxes",
            Route::Services => "/servicios",
            Route::Appointments => "/turnos",
            Route::Calendar => "/calendario",
            Route::ClinicalRecords => "/historias-clinicas",
            Route::Profile => "/perfil",
        }
    }

    /// Resolve a path; unknown paths land on the dashboard.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::Dashboard)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Iniciar sesión",
            Route::Register => "Crear cuenta",
            Route::Dashboard => "Inicio",
            Route::Users => "Usuarios",
            Route::Patients => "Pacientes",
            Route::Therapists => "Kinesiólogos",
            Route::Rooms => "Boxes",
            Route::Services => "Servicios",
            Route::Appointments => "Turnos",
            Route::Calendar => "Calendario",
            Route::ClinicalRecords => "Historias clínicas",
            Route::Profile => "Mi perfil",
        }
    }

    /// Screens reachable without a session
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Roles whose menu offers this screen; `None` means any signed-in user.
    pub fn allowed_roles(self) -> Option<&'static [PrimaryRole]> {
        use PrimaryRole::*;
        match self {
            Route::Users | Route::Rooms | Route::Services => Some(&[Admin]),
            Route::Patients | Route::Therapists => Some(&[Admin, Recepcionista]),
            Route::ClinicalRecords => Some(&[Admin, Kinesiologo, Paciente]),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug)]
struct RouterState {
    current: Route,
    history: Vec<Route>,
}

/// Shared navigation handle
///
/// Cloning yields another handle to the same router. Navigating to the
/// screen that is already current is a no-op, which keeps repeated
/// redirects (several 401s, double logout) from stacking up.
#[derive(Debug, Clone)]
pub struct Router {
    inner: Arc<Mutex<RouterState>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RouterState {
                current: initial,
                history: Vec::new(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, RouterState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Route {
        self.state().current
    }

    /// Move to `route`. Returns `false` when it was already current.
    pub fn navigate(&self, route: Route) -> bool {
        let mut state = self.state();
        if state.current == route {
            return false;
        }
        debug!(from = %state.current, to = %route, "navigate");
        state.current = route;
        state.history.push(route);
        true
    }

    /// Every navigation that actually happened, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.state().history.clone()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip_for_every_route() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_path_falls_back_to_dashboard() {
        assert_eq!(Route::from_path("/nope"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
        assert_eq!(Route::from_path("/turnos/"), Route::Appointments);
    }

    #[test]
    fn test_navigate_is_noop_on_same_route() {
        let router = Router::new(Route::Login);
        assert!(!router.navigate(Route::Login));
        assert!(router.navigate(Route::Dashboard));
        assert!(!router.navigate(Route::Dashboard));
        assert_eq!(router.history(), vec![Route::Dashboard]);
    }

    #[test]
    fn test_clones_share_state() {
        let router = Router::default();
        let other = router.clone();
        other.navigate(Route::Calendar);
        assert_eq!(router.current(), Route::Calendar);
    }

    #[test]
    fn test_public_routes() {
        assert!(Route::Login.is_public());
        assert!(Route::Register.is_public());
        assert!(!Route::Dashboard.is_public());
        assert!(Route::Login.allowed_roles().is_none());
    }
}

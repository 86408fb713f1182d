//! Route guard
//!
//! Decides what a screen shows given the session:
//!
//! - session still `Loading` → a neutral waiting indicator, no redirect
//! - `Ready` without a user → redirect to login
//! - `Ready` with a user whose roles do not include the screen → dashboard
//! - otherwise → the screen itself
//!
//! The guard never decides while the session is loading. Deciding on that
//! stale state would bounce a signed-in user to the login screen on every
//! restart.

use tracing::debug;

use super::{Route, Router};
use crate::session::{LoadState, Session, SessionStore};

/// What the shell should render for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session unresolved: show a spinner only
    Pending,
    /// Render the screen
    Allow,
    /// Leave for another screen
    Redirect(Route),
}

/// Pure decision for `route` under `session`
pub fn evaluate(session: &Session, route: Route) -> GuardDecision {
    if route.is_public() {
        return GuardDecision::Allow;
    }
    if session.load_state == LoadState::Loading {
        return GuardDecision::Pending;
    }
    if session.user.is_none() {
        return GuardDecision::Redirect(Route::Login);
    }
    match route.allowed_roles() {
        Some(allowed) => match session.primary_role() {
            Some(role) if allowed.contains(&role) => GuardDecision::Allow,
            _ => GuardDecision::Redirect(Route::Dashboard),
        },
        None => GuardDecision::Allow,
    }
}

/// Guard bound to the shared session and router
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    router: Router,
}

impl RouteGuard {
    pub fn new(session: SessionStore, router: Router) -> Self {
        Self { session, router }
    }

    /// Decide for the current route, performing any redirect.
    pub fn check(&self) -> GuardDecision {
        let route = self.router.current();
        let decision = evaluate(&self.session.snapshot(), route);
        if let GuardDecision::Redirect(target) = decision {
            if self.router.navigate(target) {
                debug!(from = %route, to = %target, "guard redirect");
            }
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use crate::shared::UserProfile;
    use serde_json::json;
    use std::sync::Arc;

    fn user(roles: &[&str]) -> UserProfile {
        serde_json::from_value(json!({"id": 1, "email": "u@kinesio.test", "roles": roles})).unwrap()
    }

    #[test]
    fn test_loading_is_pending_for_protected_routes() {
        let session = Session::loading();
        assert_eq!(evaluate(&session, Route::Dashboard), GuardDecision::Pending);
        assert_eq!(evaluate(&session, Route::Calendar), GuardDecision::Pending);
        assert_eq!(evaluate(&session, Route::Login), GuardDecision::Allow);
    }

    #[test]
    fn test_signed_out_redirects_to_login() {
        let session = Session::signed_out();
        assert_eq!(evaluate(&session, Route::Appointments), GuardDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_signed_in_allowed() {
        let session = Session::signed_in("t".into(), user(&["recepcionista"]));
        assert_eq!(evaluate(&session, Route::Dashboard), GuardDecision::Allow);
        assert_eq!(evaluate(&session, Route::Patients), GuardDecision::Allow);
    }

    #[test]
    fn test_role_mismatch_goes_to_dashboard() {
        let session = Session::signed_in("t".into(), user(&["paciente"]));
        assert_eq!(evaluate(&session, Route::Users), GuardDecision::Redirect(Route::Dashboard));

        let unknown = Session::signed_in("t".into(), user(&["auditor"]));
        assert_eq!(evaluate(&unknown, Route::Rooms), GuardDecision::Redirect(Route::Dashboard));
        assert_eq!(evaluate(&unknown, Route::Calendar), GuardDecision::Allow);
    }

    #[test]
    fn test_check_redirects_through_router_once() {
        let store = SessionStore::new(Arc::new(MemoryTokenStore::new()));
        let router = Router::new(Route::Calendar);
        let guard = RouteGuard::new(store.clone(), router.clone());

        assert_eq!(guard.check(), GuardDecision::Pending);
        assert!(router.history().is_empty());

        store.commit(store.epoch(), Session::signed_out());
        assert_eq!(guard.check(), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard.check(), GuardDecision::Allow);
        assert_eq!(router.history(), vec![Route::Login]);
    }
}

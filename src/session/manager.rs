//! Session manager
//!
//! Drives the session through startup resolution, login and logout.
//! Transitions that await the network hold an async transition lock, so a
//! startup resolution and a manual login never interleave: whichever settles
//! last wins. A logout or 401 that lands mid-transition bumps the store's
//! epoch and the transition is discarded instead of resurrecting the session.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::claims::decode_claims;
use super::error::SessionError;
use super::state::{Session, SessionStore};
use crate::client::AuthApi;
use crate::routing::{PrimaryRole, Route, Router};
use crate::shared::UserProfile;

/// Single owner of session transitions
#[derive(Debug)]
pub struct SessionManager {
    store: SessionStore,
    router: Router,
    auth: AuthApi,
    transition: Mutex<()>,
}

impl SessionManager {
    pub fn new(store: SessionStore, router: Router, auth: AuthApi) -> Self {
        Self {
            store,
            router,
            auth,
            transition: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn primary_role(&self) -> Option<PrimaryRole> {
        self.store.snapshot().primary_role()
    }

    /// Resolve the persisted token into a session. Always ends `Ready`.
    ///
    /// Any failure (undecodable token, profile fetch error, 401) clears the
    /// persisted token and resolves to signed out; nothing is propagated.
    pub async fn initialize(&self) -> Option<UserProfile> {
        let _transition = self.transition.lock().await;
        let epoch = self.store.epoch();

        let Some(token) = self.store.persisted_token() else {
            debug!("no persisted token, starting signed out");
            self.store.commit(epoch, Session::signed_out());
            return None;
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "persisted token unreadable, discarding");
                self.store.discard(epoch);
                return None;
            }
        };

        match self.auth.fetch_profile(&claims.subject).await {
            Ok(profile) => {
                if self.store.commit(epoch, Session::signed_in(token, profile.clone())) {
                    info!(user_id = profile.id, "session restored");
                    Some(profile)
                } else {
                    debug!("session reset during startup, keeping signed out");
                    None
                }
            }
            Err(e) => {
                warn!(subject = %claims.subject, error = %e, "profile fetch failed, discarding token");
                self.store.discard(epoch);
                None
            }
        }
    }

    /// Sign in with a freshly issued token.
    ///
    /// The token is persisted before the profile fetch so that request
    /// carries it. On failure the token is removed again and the session is
    /// left signed out; the caller decides what to show.
    pub async fn login(&self, token: &str) -> Result<UserProfile, SessionError> {
        let _transition = self.transition.lock().await;
        let epoch = self.store.epoch();
        let token = token.trim();

        if !self.store.persist_token(epoch, token)? {
            debug!("session reset before login could persist its token");
            return Err(SessionError::Superseded);
        }

        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "login token unreadable");
                self.store.discard(epoch);
                return Err(e.into());
            }
        };

        let profile = match self.auth.fetch_profile(&claims.subject).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(subject = %claims.subject, error = %e, "login profile fetch failed");
                self.store.discard(epoch);
                return Err(e.into());
            }
        };

        if !self.store.commit(epoch, Session::signed_in(token.to_string(), profile.clone())) {
            return Err(SessionError::Superseded);
        }
        info!(user_id = profile.id, roles = ?profile.role_names(), "signed in");
        Ok(profile)
    }

    /// Sign out and go to the login screen. Safe to call repeatedly.
    pub fn logout(&self) {
        let was_signed_in = self.store.is_authenticated();
        self.store.invalidate();
        self.router.navigate(Route::Login);
        if was_signed_in {
            info!("signed out");
        }
    }
}

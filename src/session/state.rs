//! Session state and its shared handle

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use super::error::StorageError;
use super::token_store::TokenStore;
use crate::routing::{select_primary_role, PrimaryRole};
use crate::shared::UserProfile;

/// Whether the startup resolution has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// The signed-in user, as far as the console knows
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub roles: Vec<String>,
    pub load_state: LoadState,
}

impl Session {
    /// Process-start state: nothing known yet
    pub fn loading() -> Self {
        Self {
            token: None,
            user: None,
            roles: Vec::new(),
            load_state: LoadState::Loading,
        }
    }

    /// Resolved with nobody signed in
    pub fn signed_out() -> Self {
        Self {
            load_state: LoadState::Ready,
            ..Self::loading()
        }
    }

    /// Resolved with a profile
    pub fn signed_in(token: String, user: UserProfile) -> Self {
        let roles = user.role_names();
        Self {
            token: Some(token),
            user: Some(user),
            roles,
            load_state: LoadState::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_ready() && self.user.is_some()
    }

    pub fn primary_role(&self) -> Option<PrimaryRole> {
        select_primary_role(&self.roles)
    }
}

/// Shared handle to the session and the persisted token
///
/// Reads are public. Writes are crate-private so that only the session
/// manager and the 401 handler can change the session. Every reset bumps
/// an epoch; a transition that started under an older epoch is not allowed
/// to commit.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    tokens: Arc<dyn TokenStore>,
    epoch: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::loading())),
            tokens,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.read().load_state
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    pub fn roles(&self) -> Vec<String> {
        self.read().roles.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Token currently in persistent storage
    pub fn persisted_token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Write `token` to storage if no reset happened since `expected_epoch`.
    ///
    /// Returns `Ok(false)` without touching storage when the epoch moved.
    pub(crate) fn persist_token(&self, expected_epoch: u64, token: &str) -> Result<bool, StorageError> {
        let _state = self.write();
        if self.epoch() != expected_epoch {
            return Ok(false);
        }
        self.tokens.save(token)?;
        Ok(true)
    }

    /// Replace the session if no reset happened since `expected_epoch`.
    pub(crate) fn commit(&self, expected_epoch: u64, session: Session) -> bool {
        let mut state = self.write();
        if self.epoch() != expected_epoch {
            return false;
        }
        *state = session;
        true
    }

    /// Clear token and session if no reset happened since `expected_epoch`.
    pub(crate) fn discard(&self, expected_epoch: u64) -> bool {
        let mut state = self.write();
        if self.epoch() != expected_epoch {
            return false;
        }
        self.clear_token();
        *state = Session::signed_out();
        true
    }

    /// Unconditional reset: clear token, sign out, bump the epoch.
    pub(crate) fn invalidate(&self) {
        let mut state = self.write();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.clear_token();
        *state = Session::signed_out();
    }

    fn clear_token(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "failed to clear persisted token");
        }
    }
}

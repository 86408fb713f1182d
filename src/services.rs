//! Service wiring
//!
//! Builds the shared pieces once, in dependency order: token store →
//! session store → router → HTTP client (with its middleware) → session
//! manager. Views and tests receive a [`Services`] instead of reaching for
//! globals.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::client::{
    ApiError, ApiService, AppointmentsApi, AuthApi, BearerAuth, ClinicalRecordsApi, HttpClient,
    ReportsApi, TraceRequests, UnauthorizedHandler,
};
use crate::routing::{Route, RouteGuard, Router};
use crate::session::{SessionManager, SessionStore, TokenStore};
use crate::shared::{AppConfig, Resource};

/// Everything a screen needs to talk to the backend
#[derive(Debug, Clone)]
pub struct Services {
    pub config: AppConfig,
    pub router: Router,
    pub http: HttpClient,
    pub session: Arc<SessionManager>,
}

impl Services {
    /// Wire the services. The router starts on the dashboard; the guard
    /// holds it there until the session resolves.
    pub fn new(config: AppConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let store = SessionStore::new(tokens);
        let router = Router::new(Route::Dashboard);
        let http = HttpClient::builder(&config)
            .with_middleware(TraceRequests)
            .with_middleware(UnauthorizedHandler::new(store.clone(), router.clone()))
            .with_middleware(BearerAuth::new(store.clone()))
            .build()?;
        let session = Arc::new(SessionManager::new(
            store,
            router.clone(),
            AuthApi::new(http.clone()),
        ));
        Ok(Self {
            config,
            router,
            http,
            session,
        })
    }

    pub fn store(&self) -> &SessionStore {
        self.session.store()
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.store().clone(), self.router.clone())
    }

    pub fn auth(&self) -> AuthApi {
        self.session.auth().clone()
    }

    pub fn resource<T: DeserializeOwned>(&self, resource: Resource) -> ApiService<T> {
        ApiService::for_resource(self.http.clone(), resource)
    }

    pub fn appointments(&self) -> AppointmentsApi {
        AppointmentsApi::new(self.http.clone())
    }

    pub fn clinical_records(&self) -> ClinicalRecordsApi {
        ClinicalRecordsApi::new(self.http.clone())
    }

    pub fn reports(&self) -> ReportsApi {
        ReportsApi::new(self.http.clone())
    }
}

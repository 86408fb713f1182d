//! Request/response middleware
//!
//! Request hooks run in registration order; response hooks run in reverse
//! order, so the first middleware registered sees the request first and
//! the response last.
//!
//! The built-in chain, outermost first:
//!
//! 1. [`TraceRequests`] - logs method, path and status
//! 2. [`UnauthorizedHandler`] - on 401, drops the session and redirects
//! 3. [`BearerAuth`] - attaches the persisted token

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request, StatusCode};
use tracing::{debug, info, warn};

use crate::routing::{Route, Router};
use crate::session::SessionStore;

/// Endpoints that must never carry a bearer token
pub const PUBLIC_AUTH_PATHS: [&str; 2] = ["/auth/login", "/auth/register"];

/// What a middleware knows about the call it is wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    /// Path relative to the API root, always starting with `/`
    pub path: String,
}

impl RequestContext {
    pub fn new(method: Method, path: &str) -> Self {
        let path = path.split('?').next().unwrap_or_default();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self { method, path }
    }
}

/// A hook around every outbound request
pub trait Middleware: Send + Sync + fmt::Debug {
    fn on_request(&self, _ctx: &RequestContext, _request: &mut Request) {}

    fn on_response(&self, _ctx: &RequestContext, _status: StatusCode) {}
}

/// Whether `path` is one of the public authentication endpoints
pub fn is_public_auth_path(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    PUBLIC_AUTH_PATHS.contains(&trimmed)
}

/// Attaches `Authorization: Bearer <token>` when a token is persisted
#[derive(Debug, Clone)]
pub struct BearerAuth {
    session: SessionStore,
}

impl BearerAuth {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, ctx: &RequestContext, request: &mut Request) {
        if is_public_auth_path(&ctx.path) {
            return;
        }
        let Some(token) = self.session.persisted_token() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => warn!(error = %e, "persisted token is not a valid header value"),
        }
    }
}

/// Drops the session and goes to the login screen on any 401
///
/// The error itself still reaches the caller.
#[derive(Debug, Clone)]
pub struct UnauthorizedHandler {
    session: SessionStore,
    router: Router,
}

impl UnauthorizedHandler {
    pub fn new(session: SessionStore, router: Router) -> Self {
        Self { session, router }
    }
}

impl Middleware for UnauthorizedHandler {
    fn on_response(&self, ctx: &RequestContext, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        self.session.invalidate();
        if self.router.navigate(Route::Login) {
            info!(path = %ctx.path, "401 received, redirected to login");
        } else {
            debug!(path = %ctx.path, "401 received while on login");
        }
    }
}

/// Logs every request and its status
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRequests;

impl Middleware for TraceRequests {
    fn on_request(&self, ctx: &RequestContext, _request: &mut Request) {
        debug!(method = %ctx.method, path = %ctx.path, "request");
    }

    fn on_response(&self, ctx: &RequestContext, status: StatusCode) {
        if status.is_success() {
            debug!(method = %ctx.method, path = %ctx.path, status = status.as_u16(), "response");
        } else {
            warn!(method = %ctx.method, path = %ctx.path, status = status.as_u16(), "response");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LoadState, MemoryTokenStore, TokenStore};
    use reqwest::Url;
    use std::sync::Arc;

    fn request(path: &str) -> (RequestContext, Request) {
        let url = Url::parse(&format!("http://api.test{}", path)).unwrap();
        (RequestContext::new(Method::GET, path), Request::new(Method::GET, url))
    }

    fn store_with(token: Option<&str>) -> (SessionStore, Arc<MemoryTokenStore>) {
        let tokens = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        (SessionStore::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_context_normalizes_path() {
        assert_eq!(RequestContext::new(Method::GET, "turnos?x=1").path, "/turnos");
        assert_eq!(RequestContext::new(Method::GET, "/auth/login").path, "/auth/login");
    }

    #[test]
    fn test_public_paths() {
        assert!(is_public_auth_path("/auth/login"));
        assert!(is_public_auth_path("/auth/register/"));
        assert!(is_public_auth_path("/auth/login?next=/"));
        assert!(!is_public_auth_path("/auth/me"));
        assert!(!is_public_auth_path("/usuarios/1"));
    }

    #[test]
    fn test_bearer_attached_when_token_present() {
        let (store, _) = store_with(Some("abc"));
        let (ctx, mut req) = request("/turnos");
        BearerAuth::new(store).on_request(&ctx, &mut req);
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc");
    }

    #[test]
    fn test_bearer_skipped_for_public_paths() {
        let (store, _) = store_with(Some("abc"));
        for path in PUBLIC_AUTH_PATHS {
            let (ctx, mut req) = request(path);
            BearerAuth::new(store.clone()).on_request(&ctx, &mut req);
            assert!(req.headers().get(AUTHORIZATION).is_none(), "{path}");
        }
    }

    #[test]
    fn test_bearer_skipped_without_token() {
        let (store, _) = store_with(None);
        let (ctx, mut req) = request("/turnos");
        BearerAuth::new(store).on_request(&ctx, &mut req);
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unauthorized_clears_and_redirects_once() {
        let (store, tokens) = store_with(Some("abc"));
        let router = Router::new(Route::Calendar);
        let handler = UnauthorizedHandler::new(store.clone(), router.clone());
        let ctx = RequestContext::new(Method::GET, "/turnos");

        handler.on_response(&ctx, StatusCode::UNAUTHORIZED);
        handler.on_response(&ctx, StatusCode::UNAUTHORIZED);

        assert!(tokens.load().is_none());
        assert_eq!(store.load_state(), LoadState::Ready);
        assert_eq!(router.current(), Route::Login);
        assert_eq!(router.history(), vec![Route::Login]);
    }

    #[test]
    fn test_unauthorized_ignores_other_statuses() {
        let (store, tokens) = store_with(Some("abc"));
        let router = Router::new(Route::Calendar);
        let handler = UnauthorizedHandler::new(store, router.clone());
        let ctx = RequestContext::new(Method::GET, "/turnos");

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
            handler.on_response(&ctx, status);
        }
        assert_eq!(tokens.load(), Some("abc".to_string()));
        assert!(router.history().is_empty());
    }
}

//! API Client Module
//!
//! Everything that talks to the KinesioPro backend goes through a single
//! [`HttpClient`]. Cross-cutting behavior (token injection, 401 handling,
//! request tracing) lives in an explicit [`middleware`] chain around it, so
//! ordering and side effects can be exercised in isolation.
//!
//! - **`http`** - The configured client and its `request` entry point
//! - **`middleware`** - `BearerAuth`, `UnauthorizedHandler`, `TraceRequests`
//! - **`api_service`** - Uniform CRUD over one resource path
//! - **`auth_api`** - Public login/register endpoints and profile fetch
//! - **`appointments`** - Calendar, reschedule and attendance calls
//! - **`clinical`** - Clinical-record timeline per patient
//! - **`reports`** - Binary report downloads
//! - **`error`** - `ApiError` and its user-facing classification

pub mod api_service;
pub mod appointments;
pub mod auth_api;
pub mod clinical;
pub mod error;
pub mod http;
pub mod middleware;
pub mod reports;

pub use api_service::{query_pairs, ApiService};
pub use appointments::AppointmentsApi;
pub use auth_api::{AuthApi, Credentials, RegisterRequest, TokenResponse};
pub use clinical::ClinicalRecordsApi;
pub use error::{ApiError, ErrorKind};
pub use http::{HttpClient, HttpClientBuilder, RequestOptions};
pub use middleware::{
    is_public_auth_path, BearerAuth, Middleware, RequestContext, TraceRequests,
    UnauthorizedHandler, PUBLIC_AUTH_PATHS,
};
pub use reports::ReportsApi;

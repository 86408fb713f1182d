//! Authentication endpoints
//!
//! `login` and `register` are the two public endpoints; the bearer
//! middleware never attaches a token to them, and a 401 from either one
//! means rejected credentials rather than an expired session. The profile
//! fetch is an ordinary authenticated call.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ApiError;
use super::http::{HttpClient, RequestOptions};
use crate::shared::{Resource, UserProfile};

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Reply of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Self-registration form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegisterRequest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

impl RegisterRequest {
    /// Advisory checks before hitting the backend; returns `(field, message)`.
    pub fn validate(&self) -> Vec<(&'static str, &'static str)> {
        let mut problems = Vec::new();
        if self.nombre.trim().is_empty() {
            problems.push(("nombre", "El nombre es obligatorio"));
        }
        if self.apellido.trim().is_empty() {
            problems.push(("apellido", "El apellido es obligatorio"));
        }
        let email = self.email.trim();
        if !email.contains('@') || !email.contains('.') {
            problems.push(("email", "Ingresá un email válido"));
        }
        if self.password.len() < 6 {
            problems.push(("password", "La contraseña debe tener al menos 6 caracteres"));
        }
        problems
    }
}

/// Client for the authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub const LOGIN_PATH: &'static str = "/auth/login";
    pub const REGISTER_PATH: &'static str = "/auth/register";

    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let body = serde_json::to_value(credentials)?;
        let reply: TokenResponse = self
            .http
            .send_json(Method::POST, Self::LOGIN_PATH, Some(&body), &RequestOptions::default())
            .await
            .map_err(ApiError::into_credentials_rejection)?;
        info!(email = %credentials.email, "credentials accepted");
        Ok(reply)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ApiError> {
        let body = serde_json::to_value(request)?;
        self.http
            .send_json(Method::POST, Self::REGISTER_PATH, Some(&body), &RequestOptions::default())
            .await
            .map_err(ApiError::into_credentials_rejection)
    }

    /// Profile of the user a token's subject id points at
    pub async fn fetch_profile(&self, subject: &str) -> Result<UserProfile, ApiError> {
        self.http
            .send_json(
                Method::GET,
                &Resource::Users.item_path(subject),
                None,
                &RequestOptions::default(),
            )
            .await
    }
}

//! Console Types
//!
//! Form models and the events background tasks send back to the UI
//! thread.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::client::{ApiError, Credentials, RegisterRequest};
use crate::session::SessionError;
use crate::shared::clinic::TimelineGroup;
use crate::shared::{Appointment, ConfigError, FieldError, Resource, UserProfile};

/// Fields the login form shows errors next to
pub const LOGIN_FIELDS: &[&str] = &["email", "password"];

/// Fields the registration form shows errors next to
pub const REGISTER_FIELDS: &[&str] = &["nombre", "apellido", "email", "password", "dni", "telefono"];

/// Failure while starting the console
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// What a form shows after a failed submit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFailure {
    pub message: String,
    pub fields: Vec<FieldError>,
}

impl FormFailure {
    pub fn from_api(error: &ApiError, candidates: &[&str]) -> Self {
        Self {
            message: error.user_message(),
            fields: error.field_errors(candidates),
        }
    }

    pub fn from_session(error: &SessionError, candidates: &[&str]) -> Self {
        match error {
            SessionError::Api(api) => Self::from_api(api, candidates),
            other => Self {
                message: other.user_message(),
                fields: Vec::new(),
            },
        }
    }
}

/// Editable form state with per-field errors
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    pub general: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn clear(&mut self) {
        self.general = None;
        self.fields.clear();
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn apply(&mut self, failure: FormFailure) {
        self.fields = failure
            .fields
            .into_iter()
            .map(|e| (e.field, e.message))
            .collect();
        self.general = Some(failure.message);
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub password: String,
    pub dni: String,
    pub telefono: String,
    pub errors: FormErrors,
}

impl RegisterForm {
    pub fn request(&self) -> RegisterRequest {
        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        RegisterRequest {
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            dni: optional(&self.dni),
            telefono: optional(&self.telefono),
        }
    }
}

/// Result of a background task, delivered to the UI thread
#[derive(Debug)]
pub enum AppEvent {
    SessionResolved(Option<UserProfile>),
    LoginFinished(Result<UserProfile, FormFailure>),
    RegisterFinished(Result<UserProfile, FormFailure>),
    TableLoaded(Resource, Result<Vec<Value>, ApiError>),
    ItemRemoved(Resource, Result<String, ApiError>),
    AppointmentsLoaded(Result<Vec<Appointment>, ApiError>),
    AppointmentUpdated(Result<Appointment, ApiError>),
    TimelineLoaded(Result<Vec<TimelineGroup>, ApiError>),
    ReportSaved(Result<PathBuf, String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_errors_apply_and_clear() {
        let mut errors = FormErrors::default();
        errors.apply(FormFailure {
            message: "Datos inválidos".to_string(),
            fields: vec![FieldError::new("email", "email inválido")],
        });
        assert_eq!(errors.field("email"), Some("email inválido"));
        assert_eq!(errors.general.as_deref(), Some("Datos inválidos"));

        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_register_request_drops_blank_optionals() {
        let form = RegisterForm {
            nombre: " Ana ".to_string(),
            apellido: "Pérez".to_string(),
            email: "ana@example.com ".to_string(),
            password: "secreto".to_string(),
            dni: "  ".to_string(),
            telefono: "11 5555 0000".to_string(),
            errors: FormErrors::default(),
        };
        let request = form.request();
        assert_eq!(request.nombre, "Ana");
        assert_eq!(request.email, "ana@example.com");
        assert_eq!(request.dni, None);
        assert_eq!(request.telefono.as_deref(), Some("11 5555 0000"));
    }

    #[test]
    fn test_session_failure_without_api_error_has_no_fields() {
        let failure = FormFailure::from_session(&SessionError::Superseded, LOGIN_FIELDS);
        assert!(failure.fields.is_empty());
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_api_failure_maps_fields() {
        let error = ApiError::Rejected {
            status: 400,
            message: "La contraseña es incorrecta".to_string(),
            fields: Vec::new(),
        };
        let failure = FormFailure::from_api(&error, LOGIN_FIELDS);
        assert_eq!(failure.fields.len(), 1);
        assert_eq!(failure.fields[0].field, "password");
    }
}

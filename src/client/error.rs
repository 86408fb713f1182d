//! API error types
//!
//! Failures fall into four buckets that the UI treats differently:
//!
//! - **Network** - no response at all; generic connection message
//! - **Unauthorized** - 401; the session is dropped, not shown on a form,
//!   except on the public auth endpoints where it means bad credentials
//! - **Client** - other 4xx; the backend message is shown, possibly per field
//! - **Server** - 5xx; generic server message
//!
//! Nothing here is fatal. Every failure can be retried by repeating the
//! user action.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::shared::error::{payload_message, resolve_field_errors, structured_field_errors, FieldError};

/// Error category from the UI's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Unauthorized,
    Client,
    Server,
    Internal,
}

/// Failure of a backend call
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// No response: DNS, refused connection, TLS, reset
    #[error("network error: {0}")]
    Network(String),

    /// 401, with the backend's message when it sent one
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// 4xx other than 401
    #[error("request rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        /// Structured field locations, when the backend sent them
        fields: Vec<FieldError>,
    },

    /// 5xx
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx with a body that does not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, unserializable body)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build the error for a non-success response.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let payload: Option<Value> = serde_json::from_str(body).ok();
        let parsed = payload.as_ref().and_then(payload_message).or_else(|| {
            let text = body.trim();
            (!text.is_empty() && payload.is_none()).then(|| text.to_string())
        });

        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized { message: parsed };
        }

        let message = parsed.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

        if status.is_server_error() {
            ApiError::Server {
                status: status.as_u16(),
                message,
            }
        } else {
            ApiError::Rejected {
                status: status.as_u16(),
                message,
                fields: payload.as_ref().map(structured_field_errors).unwrap_or_default(),
            }
        }
    }

    /// Reinterpret a 401 from a public auth endpoint as rejected credentials.
    ///
    /// Other errors pass through unchanged.
    pub fn into_credentials_rejection(self) -> Self {
        match self {
            ApiError::Unauthorized { message } => ApiError::Rejected {
                status: 401,
                message: message.unwrap_or_else(|| "Email o contraseña incorrectos".to_string()),
                fields: Vec::new(),
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ApiError::Rejected { .. } => ErrorKind::Client,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Decode(_) | ApiError::InvalidRequest(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text to show the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Error de conexión. Verificá tu red e intentá nuevamente.".to_string()
            }
            ApiError::Unauthorized { .. } => "Tu sesión expiró. Iniciá sesión nuevamente.".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Server { .. } => {
                "Error del servidor. Intentá nuevamente más tarde.".to_string()
            }
            ApiError::Decode(_) | ApiError::InvalidRequest(_) => {
                "Respuesta inesperada del servidor.".to_string()
            }
        }
    }

    /// Field-level errors for a form with the given fields.
    ///
    /// Only client errors map to fields. Structured locations win; when the
    /// backend sent none, the message text is matched against field names.
    pub fn field_errors(&self, candidates: &[&str]) -> Vec<FieldError> {
        match self {
            ApiError::Rejected {
                message, fields, ..
            } => resolve_field_errors(fields, message, candidates),
            _ => Vec::new(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidRequest(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, r#"{"detail":"expired"}"#);
        assert_eq!(err, ApiError::Unauthorized { message: Some("expired".to_string()) });
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.field_errors(&["email", "password"]).is_empty());
    }

    #[test]
    fn test_credentials_rejection_keeps_backend_detail() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, r#"{"detail":"Contraseña incorrecta"}"#)
            .into_credentials_rejection();
        assert_eq!(err.kind(), ErrorKind::Client);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "Contraseña incorrecta");
        assert_eq!(
            err.field_errors(&["email", "password"]),
            vec![FieldError::new("password", "Contraseña incorrecta")]
        );
    }

    #[test]
    fn test_credentials_rejection_without_body() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "").into_credentials_rejection();
        assert_matches!(err, ApiError::Rejected { status: 401, message, .. } if message == "Email o contraseña incorrectos");
    }

    #[test]
    fn test_client_error_with_detail_string() {
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"detail":"El box ya está ocupado"}"#);
        assert_matches!(&err, ApiError::Rejected { status: 409, message, fields } => {
            assert_eq!(message, "El box ya está ocupado");
            assert!(fields.is_empty());
        });
        assert_eq!(err.user_message(), "El box ya está ocupado");
        assert_eq!(err.kind(), ErrorKind::Client);
    }

    #[test]
    fn test_client_error_with_structured_fields() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email"}]}"#;
        let err = ApiError::from_response(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            err.field_errors(&["email", "password"]),
            vec![FieldError::new("email", "value is not a valid email")]
        );
    }

    #[test]
    fn test_keyword_field_mapping() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"detail":"Contraseña incorrecta"}"#);
        assert_eq!(
            err.field_errors(&["email", "password"]),
            vec![FieldError::new("password", "Contraseña incorrecta")]
        );
    }

    #[test]
    fn test_server_error_is_generic_for_users() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "Traceback ...");
        assert_matches!(&err, ApiError::Server { status: 500, message } if message == "Traceback ...");
        assert_eq!(err.user_message(), "Error del servidor. Intentá nuevamente más tarde.");
        assert!(err.field_errors(&["email"]).is_empty());
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        assert_matches!(err, ApiError::Rejected { message, .. } if message == "Not Found");
    }

    #[test]
    fn test_network_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.user_message().starts_with("Error de conexión"));
        assert_eq!(err.status(), None);
    }
}

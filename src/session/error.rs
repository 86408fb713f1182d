//! Session error types

use thiserror::Error;

use crate::client::ApiError;

/// Token could not be read for a subject id
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token carries no subject id")]
    MissingSubject,
}

/// Token persistence failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session transition failure
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A logout or 401 cleared the session while this transition was in flight
    #[error("session was reset while signing in")]
    Superseded,
}

impl SessionError {
    /// Text suitable for the login form
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Token(_) => "La sesión recibida no es válida.".to_string(),
            SessionError::Api(err) => err.user_message(),
            SessionError::Storage(_) => "No se pudo guardar la sesión en este equipo.".to_string(),
            SessionError::Superseded => "La sesión se cerró durante el ingreso.".to_string(),
        }
    }
}

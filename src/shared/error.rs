//! Form Error Mapping
//!
//! Backend validation failures arrive either as a structured list of
//! field locations or as free text. This module turns both shapes into
//! [`FieldError`]s that a form can attach next to the offending input.
//!
//! # Payload Shapes
//!
//! - `{"detail": [{"loc": ["body", "email"], "msg": "..."}]}` - structured
//! - `{"detail": "El email ya está registrado"}` - free text
//! - `{"message": "..."}` - free text
//!
//! Frontend validation is advisory only; the backend stays authoritative.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Validation failure pinned to a single form field
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Form field name (last segment of the backend location)
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Location prefixes the backend adds that never name a form field.
const LOCATION_PREFIXES: &[&str] = &["body", "query", "path", "header"];

/// Spanish spellings the backend uses in free-text messages.
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("email", &["email", "correo", "e-mail"]),
    ("password", &["password", "contraseña", "clave"]),
    ("dni", &["dni", "documento"]),
    ("telefono", &["telefono", "teléfono", "celular"]),
    ("nombre", &["nombre"]),
    ("apellido", &["apellido"]),
    ("fecha", &["fecha"]),
    ("hora", &["hora", "horario"]),
    ("matricula", &["matricula", "matrícula"]),
];

/// Extract the human-readable message from an error payload.
pub fn payload_message(payload: &Value) -> Option<String> {
    match payload.get("detail") {
        Some(Value::String(text)) => return Some(text.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }
    payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Parse the structured field-location list, if the payload carries one.
pub fn structured_field_errors(payload: &Value) -> Vec<FieldError> {
    let Some(Value::Array(items)) = payload.get("detail") else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let message = item.get("msg").and_then(Value::as_str)?;
            let field = item
                .get("loc")
                .and_then(Value::as_array)?
                .iter()
                .rev()
                .filter_map(|segment| match segment {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .find(|s| !LOCATION_PREFIXES.contains(&s.as_str()))?;
            Some(FieldError::new(field, message))
        })
        .collect()
}

/// Pick the form field a free-text message most likely refers to.
///
/// Only `candidates` (the fields the current form actually has) can win;
/// the first candidate whose name or alias occurs in the message is chosen.
pub fn match_field_by_keyword(message: &str, candidates: &[&str]) -> Option<String> {
    let lowered = message.to_lowercase();
    candidates
        .iter()
        .find(|candidate| {
            let aliases = FIELD_ALIASES
                .iter()
                .find(|(field, _)| field == *candidate)
                .map(|(_, aliases)| *aliases)
                .unwrap_or(&[]);
            lowered.contains(&candidate.to_lowercase())
                || aliases.iter().any(|alias| lowered.contains(alias))
        })
        .map(|candidate| candidate.to_string())
}

/// Resolve field errors for a form: structured locations first, keywords second.
pub fn resolve_field_errors(
    structured: &[FieldError],
    message: &str,
    candidates: &[&str],
) -> Vec<FieldError> {
    let known: Vec<FieldError> = structured
        .iter()
        .filter(|e| candidates.contains(&e.field.as_str()))
        .cloned()
        .collect();
    if !known.is_empty() {
        return known;
    }
    match_field_by_keyword(message, candidates)
        .map(|field| vec![FieldError::new(field, message)])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_message_string_detail() {
        let payload = json!({"detail": "Turno no encontrado"});
        assert_eq!(payload_message(&payload), Some("Turno no encontrado".to_string()));
    }

    #[test]
    fn test_payload_message_list_detail() {
        let payload = json!({"detail": [
            {"loc": ["body", "email"], "msg": "email inválido"},
            {"loc": ["body", "dni"], "msg": "dni requerido"}
        ]});
        assert_eq!(
            payload_message(&payload),
            Some("email inválido; dni requerido".to_string())
        );
    }

    #[test]
    fn test_payload_message_fallback() {
        assert_eq!(payload_message(&json!({"message": "boom"})), Some("boom".to_string()));
        assert_eq!(payload_message(&json!({"other": 1})), None);
    }

    #[test]
    fn test_structured_field_errors_skip_prefixes() {
        let payload = json!({"detail": [
            {"loc": ["body", "email"], "msg": "email inválido"},
            {"loc": ["body", "telefonos", 0], "msg": "formato"},
            {"loc": ["body"], "msg": "cuerpo vacío"}
        ]});
        let errors = structured_field_errors(&payload);
        assert_eq!(
            errors,
            vec![
                FieldError::new("email", "email inválido"),
                FieldError::new("telefonos", "formato"),
            ]
        );
    }

    #[test]
    fn test_keyword_match_uses_aliases() {
        let fields = ["nombre", "email", "dni"];
        assert_eq!(
            match_field_by_keyword("Ya existe un paciente con ese correo", &fields),
            Some("email".to_string())
        );
        assert_eq!(
            match_field_by_keyword("El DNI ya está registrado", &fields),
            Some("dni".to_string())
        );
        assert_eq!(match_field_by_keyword("Error inesperado", &fields), None);
    }

    #[test]
    fn test_keyword_match_respects_candidates() {
        assert_eq!(match_field_by_keyword("contraseña incorrecta", &["email"]), None);
    }

    #[test]
    fn test_resolve_prefers_structured() {
        let structured = vec![FieldError::new("email", "email inválido")];
        let resolved = resolve_field_errors(&structured, "dni duplicado", &["email", "dni"]);
        assert_eq!(resolved, structured);
    }

    #[test]
    fn test_resolve_falls_back_to_keywords() {
        let resolved = resolve_field_errors(&[], "dni duplicado", &["email", "dni"]);
        assert_eq!(resolved, vec![FieldError::new("dni", "dni duplicado")]);
    }

    #[test]
    fn test_field_error_display() {
        let error = FieldError::new("email", "inválido");
        assert_eq!(error.to_string(), "email: inválido");
    }
}

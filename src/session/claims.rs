//! Token claims
//!
//! The console only needs the subject id to fetch the profile. The
//! signature is never checked here and the claims are never used for
//! authorization; the backend validates the token on every request.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;

use super::error::TokenError;

/// Claims the console reads from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Profile id, as it appears in `/usuarios/{id}`
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Expired according to the token's own `exp`; informational only.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    exp: Option<Value>,
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unverified_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Decode `token` without verifying it and extract the subject id.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let key = DecodingKey::from_secret(&[]);
    let data = decode::<RawClaims>(token.trim(), &key, &unverified_validation())
        .map_err(|e| TokenError::Malformed(e.to_string()))?;
    let raw = data.claims;

    let subject = [&raw.sub, &raw.user_id, &raw.id]
        .into_iter()
        .flatten()
        .find_map(id_string)
        .ok_or(TokenError::MissingSubject)?;

    let expires_at = raw
        .exp
        .as_ref()
        .and_then(|exp| exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64)))
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    Ok(TokenClaims { subject, expires_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn mint(claims: Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"backend-secret")).unwrap()
    }

    #[test]
    fn test_string_subject() {
        let token = mint(json!({"sub": "42", "exp": 1_900_000_000}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.subject, "42");
        assert_eq!(claims.expires_at, DateTime::from_timestamp(1_900_000_000, 0));
    }

    #[test]
    fn test_numeric_id_claim() {
        let token = mint(json!({"id": 7}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.subject, "7");
        assert!(claims.expires_at.is_none());
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let token = mint(json!({"sub": "3", "exp": 1_000}));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_audience_is_ignored() {
        let token = mint(json!({"sub": "3", "aud": "kinesiopro-api"}));
        assert_eq!(decode_claims(&token).unwrap().subject, "3");
    }

    #[test]
    fn test_malformed_token() {
        assert_matches!(decode_claims("not-a-jwt"), Err(TokenError::Malformed(_)));
        assert_matches!(decode_claims(""), Err(TokenError::Malformed(_)));
    }

    #[test]
    fn test_missing_subject() {
        let token = mint(json!({"role": "admin"}));
        assert_eq!(decode_claims(&token), Err(TokenError::MissingSubject));
    }
}

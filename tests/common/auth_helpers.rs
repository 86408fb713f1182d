//! Authentication test helpers

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use kinesiopro::services::Services;
use kinesiopro::session::{MemoryTokenStore, TokenStore};
use kinesiopro::shared::AppConfig;

/// Sign a token the way the backend would. The console never checks the
/// signature, so any secret works.
pub fn mint_token(sub: impl Into<Value>) -> String {
    let claims = json!({ "sub": sub.into(), "exp": 4_102_444_800u64 });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"backend-secret"))
        .expect("token encodes")
}

/// Services talking to `server_uri`, with tokens kept in memory
pub fn services_for(server_uri: &str, tokens: Arc<MemoryTokenStore>) -> Services {
    let config = AppConfig::builder()
        .api_base_url(server_uri)
        .build()
        .expect("valid test config");
    let tokens: Arc<dyn TokenStore> = tokens;
    Services::new(config, tokens).expect("services build")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

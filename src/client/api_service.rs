//! Generic CRUD service
//!
//! Uniform access to one backend collection. Errors are logged and then
//! returned unchanged; there is no retry and no local caching.

use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use super::error::ApiError;
use super::http::{HttpClient, RequestOptions};
use crate::shared::Resource;

/// Flatten query parameters into string pairs, sorted by key.
///
/// `params` must serialize to a JSON object (or null for "no parameters").
/// Null values are skipped, arrays repeat the key once per element.
pub fn query_pairs<Q: Serialize + ?Sized>(params: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(params)?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::InvalidRequest(format!(
                "query parameters must be an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(&item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(&other) {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// CRUD access to one collection, decoding items as `T`
pub struct ApiService<T> {
    http: HttpClient,
    base_path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for ApiService<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_path: self.base_path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ApiService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiService")
            .field("base_path", &self.base_path)
            .finish()
    }
}

impl<T: DeserializeOwned> ApiService<T> {
    pub fn new(http: HttpClient, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let base_path = format!("/{}", base_path.trim_matches('/'));
        Self {
            http,
            base_path,
            _record: PhantomData,
        }
    }

    pub fn for_resource(http: HttpClient, resource: Resource) -> Self {
        Self::new(http, resource.base_path())
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn item_path(&self, id: impl fmt::Display) -> String {
        format!("{}/{}", self.base_path, id)
    }

    fn logged<R>(&self, op: &str, result: Result<R, ApiError>) -> Result<R, ApiError> {
        if let Err(e) = &result {
            error!(resource = %self.base_path, op, error = %e, "resource call failed");
        }
        result
    }

    /// GET the collection, filtered by `params`
    pub async fn list<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Vec<T>, ApiError> {
        let options = RequestOptions::with_query(query_pairs(params)?);
        let result = self
            .http
            .send_json(Method::GET, &self.base_path, None, &options)
            .await;
        self.logged("list", result)
    }

    pub async fn get(&self, id: impl fmt::Display) -> Result<T, ApiError> {
        let result = self
            .http
            .send_json(Method::GET, &self.item_path(id), None, &RequestOptions::default())
            .await;
        self.logged("get", result)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(data)?;
        let result = self
            .http
            .send_json(Method::POST, &self.base_path, Some(&body), &RequestOptions::default())
            .await;
        self.logged("create", result)
    }

    /// PUT: full replacement of the record
    pub async fn update<B: Serialize + ?Sized>(&self, id: impl fmt::Display, data: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(data)?;
        let result = self
            .http
            .send_json(Method::PUT, &self.item_path(id), Some(&body), &RequestOptions::default())
            .await;
        self.logged("update", result)
    }

    /// PATCH: only the given fields change
    pub async fn patch<B: Serialize + ?Sized>(&self, id: impl fmt::Display, data: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(data)?;
        let result = self
            .http
            .send_json(Method::PATCH, &self.item_path(id), Some(&body), &RequestOptions::default())
            .await;
        self.logged("patch", result)
    }

    pub async fn remove(&self, id: impl fmt::Display) -> Result<(), ApiError> {
        let result = self
            .http
            .send_empty(Method::DELETE, &self.item_path(id), None, &RequestOptions::default())
            .await;
        self.logged("remove", result)
    }
}

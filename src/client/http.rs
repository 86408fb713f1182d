//! HTTP client wrapper
//!
//! One configured `reqwest::Client` plus the middleware chain. Cloning is
//! cheap and every clone shares the same connection pool and chain.
//!
//! No retries, no caching and no timeouts beyond the transport's own:
//! failures surface as transport errors or non-2xx statuses.

use std::sync::Arc;

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::error::ApiError;
use super::middleware::{Middleware, RequestContext};
use crate::shared::AppConfig;

/// Extra per-call request settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Query string pairs, in order
    pub query: Vec<(String, String)>,
    /// Additional headers
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl HttpClientBuilder {
    /// Append a middleware; earlier ones wrap later ones.
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn build(self) -> Result<HttpClient, ApiError> {
        Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("base URL {}: {}", self.base_url, e)))?;
        let client = Client::builder()
            .user_agent(concat!("kinesiopro/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpClient {
            client,
            base_url: self.base_url,
            chain: Arc::new(self.middleware),
        })
    }
}

/// The single outbound HTTP entry point
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    chain: Arc<Vec<Arc<dyn Middleware>>>,
}

impl HttpClient {
    pub fn builder(config: &AppConfig) -> HttpClientBuilder {
        HttpClientBuilder {
            base_url: config.api_base_url.clone(),
            middleware: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ApiError::InvalidRequest(format!("{}: {}", joined, e)))
    }

    /// Send a request through the middleware chain.
    ///
    /// A query string in `path` is kept and `options.query` is appended
    /// after it; middleware only sees the bare path. Returns the response on 2xx. Any other status becomes an
    /// [`ApiError`] after the response hooks have run, so a 401 has
    /// already cleared the session by the time the caller sees it.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        let ctx = RequestContext::new(method.clone(), path);
        let mut builder = self.client.request(method, self.url(path)?);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let mut request = builder.build()?;

        for middleware in self.chain.iter() {
            middleware.on_request(&ctx, &mut request);
        }

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(method = %ctx.method, path = %ctx.path, error = %e, "request failed");
                return Err(ApiError::Network(e.to_string()));
            }
        };

        let status = response.status();
        for middleware in self.chain.iter().rev() {
            middleware.on_response(&ctx, status);
        }
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        warn!(method = %ctx.method, path = %ctx.path, status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }

    /// Send and decode a JSON response body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body, options).await?;
        response.json::<T>().await.map_err(|e| {
            error!(path = %path, error = %e, "response body did not match");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send and discard whatever body comes back.
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<(), ApiError> {
        self.request(method, path, body, options).await.map(|_| ())
    }

    /// GET a binary body, e.g. a PDF report.
    pub async fn get_bytes(&self, path: &str, options: &RequestOptions) -> Result<Vec<u8>, ApiError> {
        let response = self.request(Method::GET, path, None, options).await?;
        let bytes = response.bytes().await.map_err(|e| {
            error!(path = %path, error = %e, "failed reading binary body");
            ApiError::Network(e.to_string())
        })?;
        Ok(bytes.to_vec())
    }
}

//! Application configuration module
//!
//! Provides the configuration types shared by the API client and the console.
//! Values are layered: defaults, then an optional TOML file, then environment
//! variables.

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default tracing filter for the console
pub const DEFAULT_LOG_FILTER: &str = "info,kinesiopro=debug";

/// Fixed storage key for the persisted bearer token
pub const TOKEN_STORAGE_KEY: &str = "kinesiopro_token";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "KINESIO_API_URL";

/// Environment variable overriding the token file location
pub const ENV_TOKEN_FILE: &str = "KINESIO_TOKEN_FILE";

/// Environment variable pointing at a TOML config file
pub const ENV_CONFIG_FILE: &str = "KINESIO_CONFIG";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, always without a trailing slash
    pub api_base_url: String,
    /// Where the bearer token is persisted; `None` means the default data dir
    pub token_file: Option<PathBuf>,
    /// Filter directive for `tracing-subscriber`
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            token_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    token_file: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from defaults, `KINESIO_CONFIG` (if set) and environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) => AppConfigBuilder::from_file(Path::new(&path))?,
            Err(_) => AppConfig::builder(),
        };
        if let Ok(url) = std::env::var(ENV_API_URL) {
            builder = builder.api_base_url(url);
        }
        if let Ok(path) = std::env::var(ENV_TOKEN_FILE) {
            builder = builder.token_file(PathBuf::from(path));
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.api_base_url)
    }

    /// Full URL for a path relative to the API base
    pub fn api_url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.api_base_url.clone();
        }
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Token file location, falling back to the platform data directory.
    pub fn token_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }
        let mut path = dirs::data_dir().ok_or(ConfigError::MissingValue("data directory"))?;
        path.push("kinesiopro");
        path.push(TOKEN_STORAGE_KEY);
        Ok(path)
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_base_url: Option<String>,
    token_file: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Seed a builder from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            api_base_url: file.api_base_url,
            token_file: file.token_file,
            log_filter: file.log_filter,
        })
    }

    /// Seed a builder from a TOML file on disk
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the token file path
    pub fn token_file(mut self, path: PathBuf) -> Self {
        self.token_file = Some(path);
        self
    }

    /// Set the tracing filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let api_base_url = self
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if api_base_url.is_empty() {
            return Err(ConfigError::MissingValue("api_base_url"));
        }
        let config = AppConfig {
            api_base_url,
            token_file: self.token_file,
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config read error: {0}")]
    Io(String),
}

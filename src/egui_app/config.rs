use std::sync::Arc;

use crate::session::{FileTokenStore, TokenStore};
use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Console configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Load from the config file and environment (`KINESIO_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            app: AppConfig::from_env()?,
        })
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn server_url(&self) -> &str {
        &self.app.api_base_url
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        self.app.api_url(path)
    }

    /// Token storage backed by the configured token file
    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>, ConfigError> {
        Ok(Arc::new(FileTokenStore::new(self.app.token_path()?)))
    }
}

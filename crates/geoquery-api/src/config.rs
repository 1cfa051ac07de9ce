use std::env;

use geoquery_core::error::Result;
use geoquery_engine::EngineConfig;
use geoquery_llm::TranslatorConfig;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub engine: EngineConfig,
    pub translator: TranslatorConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let port = env::var("GEOQUERY_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin =
            env::var("GEOQUERY_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            port,
            cors_origin,
            engine: EngineConfig::from_env()?,
            translator: TranslatorConfig::from_env(),
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

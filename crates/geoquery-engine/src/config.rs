//! Spatial engine configuration

use std::time::Duration;

use geoquery_core::error::{GeoqueryError, Result};
use geoquery_geo::Hemisphere;

/// Connection and behavior configuration for the spatial engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Database connection URL
    pub database_url: String,
    /// Connection pool configuration
    pub pool: PoolConfig,
    /// Upper bound on any single query's execution time
    pub query_timeout: Duration,
    /// Hemisphere selecting the UTM EPSG base for buffer reprojection
    pub hemisphere: Hemisphere,
}

impl EngineConfig {
    /// Create a new configuration with the given database URL and defaults.
    pub fn new(database_url: impl Into<String>) -> Result<Self> {
        let config = Self {
            database_url: database_url.into(),
            pool: PoolConfig::default(),
            query_timeout: Duration::from_secs(30),
            hemisphere: Hemisphere::North,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; `GEOQUERY_QUERY_TIMEOUT_SECS` and
    /// `GEOQUERY_UTM_HEMISPHERE` override the defaults (30 s, north).
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| GeoqueryError::ConfigMissing { key: "DATABASE_URL".to_string() })?;

        let mut config = Self::new(database_url)?;

        if let Ok(raw) = std::env::var("GEOQUERY_QUERY_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| GeoqueryError::ConfigInvalid {
                key: "GEOQUERY_QUERY_TIMEOUT_SECS".to_string(),
                reason: format!("expected an integer number of seconds, found `{}`", raw),
            })?;
            config.query_timeout = Duration::from_secs(secs);
        }

        if let Ok(raw) = std::env::var("GEOQUERY_UTM_HEMISPHERE") {
            config.hemisphere = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(GeoqueryError::ConfigInvalid {
                key: "database_url".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        if self.query_timeout.is_zero() {
            return Err(GeoqueryError::ConfigInvalid {
                key: "query_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        self.pool.validate()
    }
}

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum number of connections allowed
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_connections > self.max_connections {
            return Err(GeoqueryError::ConfigInvalid {
                key: "pool.min_connections".to_string(),
                reason: format!(
                    "min_connections ({}) cannot be greater than max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.max_connections == 0 {
            return Err(GeoqueryError::ConfigInvalid {
                key: "pool.max_connections".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

//! Spatial engine session management.
//!
//! One `SpatialEngine` instance lives for the whole process and owns the
//! single underlying PostGIS session. The session is created lazily on first
//! demand; holding the slot lock across creation makes the
//! connect-and-load-extension sequence single-flight, so concurrent first
//! callers never race to create two sessions. A failed creation leaves the
//! slot empty, so a later call retries from scratch.

use std::future::Future;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tokio::sync::Mutex;

use geoquery_core::error::{GeoqueryError, Result};

use crate::config::EngineConfig;

/// Gateway to the spatial SQL engine.
///
/// Queries are independent, stateless executions against the shared pool;
/// nothing is held server-side between requests.
pub struct SpatialEngine {
    config: EngineConfig,
    session: Mutex<Option<PgPool>>,
}

impl SpatialEngine {
    /// Create the engine handle. Does not connect; the session is
    /// established on first use.
    pub fn new(config: EngineConfig) -> Self {
        Self { config, session: Mutex::new(None) }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the live session, creating it if this is the first use.
    ///
    /// Creation connects, probes connectivity, and loads the spatial
    /// extension exactly once. Repeated calls reuse the existing session and
    /// never re-run the capability load.
    pub async fn acquire(&self) -> Result<PgPool> {
        let mut slot = self.session.lock().await;

        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        tracing::info!("Creating spatial engine session");

        let pool = PgPoolOptions::new()
            .min_connections(self.config.pool.min_connections)
            .max_connections(self.config.pool.max_connections)
            .acquire_timeout(self.config.pool.acquire_timeout)
            .connect(&self.config.database_url)
            .await
            .map_err(|e| GeoqueryError::EngineUnavailable {
                reason: format!("failed to connect to the spatial engine: {}", e),
            })?;

        sqlx::query("SELECT 1").fetch_one(&pool).await.map_err(|e| {
            GeoqueryError::EngineUnavailable { reason: format!("connection test failed: {}", e) }
        })?;

        sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis").execute(&pool).await.map_err(
            |e| GeoqueryError::EngineUnavailable {
                reason: format!("failed to load the spatial extension: {}", e),
            },
        )?;

        tracing::info!("Spatial engine session ready");

        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Run a query future under the configured execution time bound.
    pub(crate) async fn timed<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = sqlx::Result<T>>,
    {
        match tokio::time::timeout(self.config.query_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(GeoqueryError::QueryExecution { reason: e.to_string() }),
            Err(_) => Err(GeoqueryError::QueryExecution {
                reason: format!("query timed out after {:?}", self.config.query_timeout),
            }),
        }
    }

    /// Verify the session is usable.
    pub async fn health_check(&self) -> Result<()> {
        let pool = self.acquire().await?;
        self.timed(sqlx::query("SELECT 1").fetch_one(&pool)).await?;
        Ok(())
    }

    /// Execute an already-guarded SELECT and return the first column of each
    /// row as GeoJSON text. Used by the natural-language path; the dispatcher
    /// path goes through the typed operation handlers instead.
    pub async fn execute_geometry_rows(&self, sql: &str) -> Result<Vec<String>> {
        let pool = self.acquire().await?;
        let rows = self.timed(sqlx::query(sql).fetch_all(&pool)).await?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                row.try_get::<String, _>(0).map_err(|e| GeoqueryError::QueryExecution {
                    reason: format!("row {} did not return geometry text: {}", i, e),
                })
            })
            .collect()
    }
}

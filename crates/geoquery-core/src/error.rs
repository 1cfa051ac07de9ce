//! Error types for geoquery

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoqueryError {
    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Longitude {longitude} is outside [-180, 180]")]
    OutOfRange { longitude: f64 },

    // Engine errors
    #[error("Spatial engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    #[error("Query execution failed: {reason}")]
    QueryExecution { reason: String },

    // Translator errors
    #[error("Query translation failed: {reason}")]
    Translation { reason: String },

    // Dispatch errors
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeoqueryError {
    /// Shorthand for an [`GeoqueryError::InvalidGeometry`] with a formatted reason.
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, GeoqueryError>;

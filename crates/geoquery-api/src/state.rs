use std::sync::Arc;

use geoquery_engine::SpatialEngine;
use geoquery_llm::QueryTranslator;

/// Shared request-handling state: the one engine handle for the process and
/// the configured translator.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SpatialEngine>,
    pub translator: Arc<dyn QueryTranslator>,
}

impl AppState {
    pub fn new(engine: Arc<SpatialEngine>, translator: Arc<dyn QueryTranslator>) -> Self {
        Self { engine, translator }
    }
}

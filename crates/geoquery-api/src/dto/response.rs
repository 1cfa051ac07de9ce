use geojson::GeoJson;
use serde::Serialize;

use geoquery_llm::ChatTurn;

/// Response of `POST /query`: the operation the translator chose, the
/// normalized geometry, and the updated conversation context for the next
/// turn.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NlQueryResponse {
    pub operation: String,
    pub geometry: GeoJson,
    pub current_ctx: Vec<ChatTurn>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "geoquery-api" }
    }
}

use serde::Deserialize;
use serde_json::Value as JsonValue;

use geoquery_llm::{ChatTurn, SelectedPoint};

/// Body of `POST /operations/{operation}`.
///
/// Which fields are required depends on the operation; the handler checks
/// presence and parses the raw GeoJSON values.
#[derive(Debug, Deserialize)]
pub struct OperationBody {
    pub geom: Option<JsonValue>,
    pub geom1: Option<JsonValue>,
    pub geom2: Option<JsonValue>,
    pub distance: Option<f64>,
}

/// Body of `POST /query`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlQueryRequest {
    pub query: String,
    #[serde(default)]
    pub selected_point: Option<SelectedPoint>,
    #[serde(default)]
    pub context: Vec<ChatTurn>,
}

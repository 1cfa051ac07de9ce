use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value as JsonValue;

use geoquery_core::models::{Geometry, OperationKind, OperationOutcome, OperationRequest};
use geoquery_engine::dispatch;

use crate::dto::OperationBody;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_operation(
    State(state): State<Arc<AppState>>,
    Path(operation): Path<String>,
    Json(body): Json<OperationBody>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let kind: OperationKind = operation.parse()?;

    tracing::info!(operation = %kind, "Processing operation request");

    let request = build_request(kind, body)?;
    let outcome = dispatch(&state.engine, request).await.map_err(|e| {
        tracing::error!(operation = %kind, error = %e, "Operation failed");
        ApiError::from(e)
    })?;

    Ok(Json(outcome))
}

/// Assemble the typed request for `kind`, rejecting absent or malformed
/// fields before anything reaches the engine.
fn build_request(kind: OperationKind, body: OperationBody) -> Result<OperationRequest, ApiError> {
    match kind {
        OperationKind::Area => Ok(OperationRequest::Area {
            geom: require_geometry(body.geom, "geom", kind)?,
        }),
        OperationKind::Centroid => Ok(OperationRequest::Centroid {
            geom: require_geometry(body.geom, "geom", kind)?,
        }),
        OperationKind::Buffer => Ok(OperationRequest::Buffer {
            geom: require_geometry(body.geom, "geom", kind)?,
            distance: body.distance.ok_or_else(|| missing_field("distance", kind))?,
        }),
        OperationKind::Distance => Ok(OperationRequest::Distance {
            geom1: require_geometry(body.geom1, "geom1", kind)?,
            geom2: require_geometry(body.geom2, "geom2", kind)?,
        }),
        OperationKind::PointInPolygon => Ok(OperationRequest::PointInPolygon {
            container: require_geometry(body.geom1, "geom1", kind)?,
            target: require_geometry(body.geom2, "geom2", kind)?,
        }),
        OperationKind::Intersection => Ok(OperationRequest::Intersection {
            geom1: require_geometry(body.geom1, "geom1", kind)?,
            geom2: require_geometry(body.geom2, "geom2", kind)?,
        }),
    }
}

fn require_geometry(
    value: Option<JsonValue>,
    field: &str,
    kind: OperationKind,
) -> Result<Geometry, ApiError> {
    let value = value.ok_or_else(|| missing_field(field, kind))?;
    Geometry::from_geojson(&value).map_err(ApiError::from)
}

fn missing_field(field: &str, kind: OperationKind) -> ApiError {
    ApiError::bad_request(format!("missing field `{}` for operation `{}`", field, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn point_body() -> OperationBody {
        OperationBody {
            geom: Some(serde_json::json!({ "type": "Point", "coordinates": [0.0, 0.0] })),
            geom1: None,
            geom2: None,
            distance: None,
        }
    }

    #[test]
    fn test_build_area_request() {
        let request = build_request(OperationKind::Area, point_body()).unwrap();
        assert!(matches!(request, OperationRequest::Area { .. }));
    }

    #[test]
    fn test_buffer_requires_distance() {
        let err = build_request(OperationKind::Buffer, point_body()).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("distance"));
    }

    #[test]
    fn test_binary_operations_require_both_geometries() {
        for kind in [
            OperationKind::Distance,
            OperationKind::PointInPolygon,
            OperationKind::Intersection,
        ] {
            let err = build_request(kind, point_body()).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert!(err.message.contains("geom1"));
        }
    }

    #[test]
    fn test_malformed_geometry_is_bad_request() {
        let body = OperationBody {
            geom: Some(serde_json::json!({ "type": "Polygon", "coordinates": "oops" })),
            geom1: None,
            geom2: None,
            distance: None,
        };
        let err = build_request(OperationKind::Area, body).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}

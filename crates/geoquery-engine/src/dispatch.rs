//! Operation dispatch.

use geoquery_core::error::Result;
use geoquery_core::models::{OperationOutcome, OperationRequest};

use crate::operations;
use crate::session::SpatialEngine;

/// Route a typed operation request to its handler and wrap the result in the
/// uniform response envelope.
pub async fn dispatch(engine: &SpatialEngine, request: OperationRequest) -> Result<OperationOutcome> {
    tracing::debug!(operation = %request.kind(), "Dispatching spatial operation");

    match request {
        OperationRequest::Area { geom } => {
            operations::area(engine, &geom).await.map(OperationOutcome::Area)
        }
        OperationRequest::Centroid { geom } => {
            operations::centroid(engine, &geom).await.map(OperationOutcome::Geometry)
        }
        OperationRequest::Buffer { geom, distance } => {
            operations::buffer(engine, &geom, distance).await.map(OperationOutcome::Geometry)
        }
        OperationRequest::Distance { geom1, geom2 } => {
            operations::distance(engine, &geom1, &geom2).await.map(OperationOutcome::Distance)
        }
        OperationRequest::PointInPolygon { container, target } => operations::point_in_polygon(
            engine, &container, &target,
        )
        .await
        .map(OperationOutcome::Containment),
        OperationRequest::Intersection { geom1, geom2 } => {
            operations::intersection(engine, &geom1, &geom2)
                .await
                .map(OperationOutcome::Intersection)
        }
    }
}

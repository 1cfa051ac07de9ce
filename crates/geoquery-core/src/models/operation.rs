//! Typed operation requests and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeoqueryError;
use crate::models::Geometry;

/// The set of supported spatial operations, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Area,
    Centroid,
    Buffer,
    Distance,
    PointInPolygon,
    Intersection,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Area,
        OperationKind::Centroid,
        OperationKind::Buffer,
        OperationKind::Distance,
        OperationKind::PointInPolygon,
        OperationKind::Intersection,
    ];

    /// Wire name used in the `/operations/{operation}` path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Area => "area",
            OperationKind::Centroid => "centroid",
            OperationKind::Buffer => "buffer",
            OperationKind::Distance => "distance",
            OperationKind::PointInPolygon => "point-in-polygon",
            OperationKind::Intersection => "intersection",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = GeoqueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(OperationKind::Area),
            "centroid" => Ok(OperationKind::Centroid),
            "buffer" => Ok(OperationKind::Buffer),
            "distance" => Ok(OperationKind::Distance),
            "point-in-polygon" => Ok(OperationKind::PointInPolygon),
            "intersection" => Ok(OperationKind::Intersection),
            other => Err(GeoqueryError::UnknownOperation { name: other.to_string() }),
        }
    }
}

/// A fully typed operation request: one variant per operation, carrying
/// exactly the inputs that operation needs. Geometries are already parsed
/// and validated by the time a request is constructed.
#[derive(Debug, Clone)]
pub enum OperationRequest {
    Area { geom: Geometry },
    Centroid { geom: Geometry },
    Buffer { geom: Geometry, distance: f64 },
    Distance { geom1: Geometry, geom2: Geometry },
    PointInPolygon { container: Geometry, target: Geometry },
    Intersection { geom1: Geometry, geom2: Geometry },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Area { .. } => OperationKind::Area,
            OperationRequest::Centroid { .. } => OperationKind::Centroid,
            OperationRequest::Buffer { .. } => OperationKind::Buffer,
            OperationRequest::Distance { .. } => OperationKind::Distance,
            OperationRequest::PointInPolygon { .. } => OperationKind::PointInPolygon,
            OperationRequest::Intersection { .. } => OperationKind::Intersection,
        }
    }
}

/// Spheroidal area in square meters plus the derived acre/hectare figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResult {
    pub area: f64,
    pub area_acres: f64,
    pub area_hectares: f64,
}

/// Geodesic distance in meters, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance: f64,
    pub units: String,
}

impl DistanceResult {
    /// Distance is always reported in meters.
    pub fn meters(distance: f64) -> Self {
        Self { distance, units: "meters".to_string() }
    }
}

/// Containment test result. A non-polygon container yields `false` rather
/// than an engine type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentResult {
    pub is_contained: bool,
}

/// Intersection test result. `intersection` is `null` when the geometries
/// are disjoint, never an empty-geometry placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionResult {
    pub intersects: bool,
    pub intersection: Option<Geometry>,
}

/// Uniform response envelope for the operation endpoints. Untagged: each
/// variant serializes as its payload alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutcome {
    Area(AreaResult),
    Geometry(Geometry),
    Distance(DistanceResult),
    Containment(ContainmentResult),
    Intersection(IntersectionResult),
}

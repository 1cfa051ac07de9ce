//! Canonical models shared across the geoquery crates.

pub mod geometry;
pub mod operation;

pub use geometry::Geometry;
pub use operation::{
    AreaResult, ContainmentResult, DistanceResult, IntersectionResult, OperationKind,
    OperationOutcome, OperationRequest,
};

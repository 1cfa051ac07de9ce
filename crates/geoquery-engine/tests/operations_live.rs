//! Operation semantics against a live PostGIS instance.
//!
//! These tests run only when `DATABASE_URL` points at a reachable database
//! with the PostGIS extension available; otherwise each test skips.

use geoquery_core::models::{Geometry, OperationOutcome, OperationRequest};
use geoquery_engine::{dispatch, EngineConfig, SpatialEngine};

fn live_engine() -> Option<SpatialEngine> {
    match EngineConfig::from_env() {
        Ok(config) => Some(SpatialEngine::new(config)),
        Err(_) => {
            eprintln!("skipping: DATABASE_URL not set");
            None
        }
    }
}

fn square(side: f64) -> Geometry {
    Geometry::polygon(vec![vec![
        [0.0, 0.0],
        [0.0, side],
        [side, side],
        [side, 0.0],
        [0.0, 0.0],
    ]])
}

fn shifted_square(origin: f64, side: f64) -> Geometry {
    Geometry::polygon(vec![vec![
        [origin, origin],
        [origin, origin + side],
        [origin + side, origin + side],
        [origin + side, origin],
        [origin, origin],
    ]])
}

#[tokio::test]
async fn centroid_of_axis_aligned_square_is_center() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(&engine, OperationRequest::Centroid { geom: square(2.0) })
        .await
        .unwrap();

    let OperationOutcome::Geometry(Geometry::Point { coordinates }) = outcome else {
        panic!("expected a Point, got {:?}", outcome);
    };
    assert!((coordinates[0] - 1.0).abs() < 1e-9);
    assert!((coordinates[1] - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn area_of_unit_square_is_positive_with_exact_conversions() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(&engine, OperationRequest::Area { geom: square(1.0) }).await.unwrap();

    let OperationOutcome::Area(result) = outcome else {
        panic!("expected an area result, got {:?}", outcome);
    };
    assert!(result.area > 0.0);
    assert!((result.area_acres - result.area / 4046.86).abs() < 1e-6);
    assert!((result.area_hectares - result.area / 10000.0).abs() < 1e-6);
}

#[tokio::test]
async fn area_of_point_is_structured_zero() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(&engine, OperationRequest::Area { geom: Geometry::point(0.0, 0.0) })
        .await
        .unwrap();

    let OperationOutcome::Area(result) = outcome else {
        panic!("expected an area result, got {:?}", outcome);
    };
    assert_eq!(result.area, 0.0);
    assert_eq!(result.area_acres, 0.0);
    assert_eq!(result.area_hectares, 0.0);
}

#[tokio::test]
async fn buffer_of_point_is_closed_polygon_ring() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(
        &engine,
        OperationRequest::Buffer { geom: Geometry::point(0.0, 0.0), distance: 100.0 },
    )
    .await
    .unwrap();

    let OperationOutcome::Geometry(Geometry::Polygon { coordinates }) = outcome else {
        panic!("expected a Polygon, got {:?}", outcome);
    };
    let ring = &coordinates[0];
    assert!(ring.len() > 3, "a buffered point approximates a circle");
    assert_eq!(ring.first(), ring.last());
}

#[tokio::test]
async fn distance_between_distinct_points_is_positive_meters() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(
        &engine,
        OperationRequest::Distance {
            geom1: Geometry::point(0.0, 0.0),
            geom2: Geometry::point(1.0, 1.0),
        },
    )
    .await
    .unwrap();

    let OperationOutcome::Distance(result) = outcome else {
        panic!("expected a distance result, got {:?}", outcome);
    };
    assert!(result.distance > 0.0);
    assert_eq!(result.units, "meters");
}

#[tokio::test]
async fn distance_to_self_is_zero() {
    let Some(engine) = live_engine() else { return };

    let point = Geometry::point(77.003912, 28.377525);
    let outcome = dispatch(
        &engine,
        OperationRequest::Distance { geom1: point.clone(), geom2: point },
    )
    .await
    .unwrap();

    let OperationOutcome::Distance(result) = outcome else {
        panic!("expected a distance result, got {:?}", outcome);
    };
    assert_eq!(result.distance, 0.0);
}

#[tokio::test]
async fn overlapping_squares_intersect_in_a_polygon() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(
        &engine,
        OperationRequest::Intersection {
            geom1: square(2.0),
            geom2: shifted_square(1.0, 2.0),
        },
    )
    .await
    .unwrap();

    let OperationOutcome::Intersection(result) = outcome else {
        panic!("expected an intersection result, got {:?}", outcome);
    };
    assert!(result.intersects);
    assert!(matches!(result.intersection, Some(Geometry::Polygon { .. })));
}

#[tokio::test]
async fn disjoint_squares_yield_null_intersection() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(
        &engine,
        OperationRequest::Intersection {
            geom1: square(2.0),
            geom2: shifted_square(3.0, 1.0),
        },
    )
    .await
    .unwrap();

    let OperationOutcome::Intersection(result) = outcome else {
        panic!("expected an intersection result, got {:?}", outcome);
    };
    assert!(!result.intersects);
    assert!(result.intersection.is_none());
}

#[tokio::test]
async fn point_in_polygon_inside_and_outside() {
    let Some(engine) = live_engine() else { return };

    let container = Geometry::polygon(vec![vec![
        [77.0038659, 28.378123],
        [77.0038766, 28.3774528],
        [77.0032436, 28.3774528],
        [77.0033295, 28.3762918],
        [77.00584, 28.3762634],
        [77.0056898, 28.3782646],
        [77.0038659, 28.378123],
    ]]);

    let inside = dispatch(
        &engine,
        OperationRequest::PointInPolygon {
            container: container.clone(),
            target: Geometry::point(77.003912, 28.377525),
        },
    )
    .await
    .unwrap();
    let OperationOutcome::Containment(result) = inside else {
        panic!("expected a containment result, got {:?}", inside);
    };
    assert!(result.is_contained);

    let outside = dispatch(
        &engine,
        OperationRequest::PointInPolygon {
            container,
            target: Geometry::point(77.429404, 28.351578),
        },
    )
    .await
    .unwrap();
    let OperationOutcome::Containment(result) = outside else {
        panic!("expected a containment result, got {:?}", outside);
    };
    assert!(!result.is_contained);
}

#[tokio::test]
async fn non_polygon_container_degrades_to_false() {
    let Some(engine) = live_engine() else { return };

    let outcome = dispatch(
        &engine,
        OperationRequest::PointInPolygon {
            container: Geometry::point(0.0, 0.0),
            target: Geometry::point(0.0, 0.0),
        },
    )
    .await
    .unwrap();

    let OperationOutcome::Containment(result) = outcome else {
        panic!("expected a containment result, got {:?}", outcome);
    };
    assert!(!result.is_contained);
}

//! Result-row normalization.
//!
//! The spatial engine hands back one GeoJSON geometry string per row. Points
//! enter that pipeline latitude-first, so every position is corrected through
//! [`swap_axis_order`] here, at row-decode time, and nowhere else. The output
//! is either a single MultiPoint feature (point rows) or a feature collection
//! (polygon rows).

use geojson::{Feature, FeatureCollection, GeoJson, Value as GeoJsonValue};
use serde_json::Map;

use geoquery_core::error::{GeoqueryError, Result};
use geoquery_core::models::Geometry;

/// The one axis-order conversion: `[a, b]` -> `[b, a]`.
///
/// Applied uniformly to every position decoded from an engine row,
/// reconciling the row source's latitude-first convention with GeoJSON's
/// longitude-first one. Never applied conditionally.
pub fn swap_axis_order(position: [f64; 2]) -> [f64; 2] {
    [position[1], position[0]]
}

/// Convert engine result rows (one GeoJSON geometry string each) into a
/// canonical GeoJSON response.
///
/// Point rows collapse into a single `Feature` wrapping a `MultiPoint`;
/// anything else becomes a `FeatureCollection` with one feature per row,
/// polygons reduced to their outer ring. Empty input yields an empty
/// collection.
pub fn normalize_rows(rows: &[String]) -> Result<GeoJson> {
    let mut decoded = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let geometry = Geometry::from_geojson_str(row).map_err(|e| {
            GeoqueryError::invalid_geometry(format!("result row {}: {}", i, e))
        })?;
        decoded.push(geometry);
    }

    match decoded.first() {
        Some(Geometry::Point { .. }) => {
            let mut positions = Vec::with_capacity(decoded.len());
            for (i, geometry) in decoded.iter().enumerate() {
                let Geometry::Point { coordinates } = geometry else {
                    return Err(GeoqueryError::invalid_geometry(format!(
                        "result row {}: expected Point rows, found mixed geometry types",
                        i
                    )));
                };
                positions.push(swap_axis_order(*coordinates).to_vec());
            }
            Ok(GeoJson::Feature(feature(GeoJsonValue::MultiPoint(positions))))
        }
        Some(_) => {
            let features = decoded.iter().map(normalize_feature).collect();
            Ok(GeoJson::FeatureCollection(collection(features)))
        }
        None => Ok(GeoJson::FeatureCollection(collection(Vec::new()))),
    }
}

fn normalize_feature(geometry: &Geometry) -> Feature {
    let value = match geometry {
        Geometry::Point { coordinates } => {
            GeoJsonValue::Point(swap_axis_order(*coordinates).to_vec())
        }
        Geometry::LineString { coordinates } => GeoJsonValue::LineString(swap_positions(coordinates)),
        // Only the outer ring survives normalization.
        Geometry::Polygon { coordinates } => {
            let outer = coordinates.first().map(|ring| swap_positions(ring)).unwrap_or_default();
            GeoJsonValue::Polygon(vec![outer])
        }
    };
    feature(value)
}

fn swap_positions(positions: &[[f64; 2]]) -> Vec<Vec<f64>> {
    positions.iter().map(|p| swap_axis_order(*p).to_vec()).collect()
}

fn feature(value: GeoJsonValue) -> Feature {
    Feature {
        geometry: Some(geojson::Geometry::new(value)),
        properties: Some(Map::new()),
        id: None,
        bbox: None,
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { features, bbox: None, foreign_members: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point_row(lat: f64, lon: f64) -> String {
        format!(r#"{{"type":"Point","coordinates":[{},{}]}}"#, lat, lon)
    }

    #[test]
    fn test_point_rows_become_multipoint() {
        let rows = vec![point_row(28.377, 77.003), point_row(-8.5, 115.0)];
        let GeoJson::Feature(feature) = normalize_rows(&rows).unwrap() else {
            panic!("expected a single feature");
        };

        let GeoJsonValue::MultiPoint(positions) = feature.geometry.unwrap().value else {
            panic!("expected MultiPoint geometry");
        };
        assert_eq!(positions.len(), 2);
        // Rows are lat-first; the output must be lon-first.
        assert_eq!(positions[0], vec![77.003, 28.377]);
        assert_eq!(positions[1], vec![115.0, -8.5]);
    }

    #[test]
    fn test_polygon_rows_become_collection() {
        let row = r#"{"type":"Polygon","coordinates":[[[28.0,77.0],[28.1,77.0],[28.1,77.1],[28.0,77.0]],[[28.02,77.02],[28.04,77.02],[28.04,77.04],[28.02,77.02]]]}"#
            .to_string();
        let GeoJson::FeatureCollection(fc) = normalize_rows(&[row]).unwrap() else {
            panic!("expected a feature collection");
        };
        assert_eq!(fc.features.len(), 1);

        let GeoJsonValue::Polygon(rings) = fc.features[0].geometry.clone().unwrap().value else {
            panic!("expected Polygon geometry");
        };
        // Inner ring dropped, outer ring vertices swapped to lon-first.
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0], vec![77.0, 28.0]);
        assert_eq!(rings[0][2], vec![77.1, 28.1]);
    }

    #[test]
    fn test_empty_rows_yield_empty_collection() {
        let GeoJson::FeatureCollection(fc) = normalize_rows(&[]).unwrap() else {
            panic!("expected a feature collection");
        };
        assert!(fc.features.is_empty());
    }

    #[test]
    fn test_mixed_rows_after_point_fail() {
        let rows = vec![
            point_row(28.0, 77.0),
            r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[0.0,1.0],[1.0,1.0],[0.0,0.0]]]}"#
                .to_string(),
        ];
        assert!(normalize_rows(&rows).is_err());
    }

    #[test]
    fn test_undecodable_row_fails_with_row_index() {
        let rows = vec![point_row(28.0, 77.0), "not json".to_string()];
        let err = normalize_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_swap_axis_order() {
        assert_eq!(swap_axis_order([28.377, 77.003]), [77.003, 28.377]);
        assert_eq!(swap_axis_order(swap_axis_order([1.0, 2.0])), [1.0, 2.0]);
    }

    proptest! {
        #[test]
        fn prop_n_point_rows_yield_n_swapped_pairs(
            pairs in proptest::collection::vec((-85.0f64..85.0, -180.0f64..180.0), 1..32)
        ) {
            let rows: Vec<String> = pairs.iter().map(|(lat, lon)| point_row(*lat, *lon)).collect();
            let GeoJson::Feature(feature) = normalize_rows(&rows).unwrap() else {
                panic!("expected a single feature");
            };
            let GeoJsonValue::MultiPoint(positions) = feature.geometry.unwrap().value else {
                panic!("expected MultiPoint geometry");
            };
            prop_assert_eq!(positions.len(), pairs.len());
            for (position, (lat, lon)) in positions.iter().zip(&pairs) {
                prop_assert_eq!(position[0], *lon);
                prop_assert_eq!(position[1], *lat);
            }
        }
    }
}

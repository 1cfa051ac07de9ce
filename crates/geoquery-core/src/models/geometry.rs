//! Canonical geometry type and GeoJSON codec.
//!
//! Coordinates are `[x, y]` = `[longitude, latitude]` everywhere this type
//! appears; the codec never reorders axes. Rows coming back from the spatial
//! engine follow a different convention and are corrected in one place by the
//! result normalizer, not here.

use serde::{Deserialize, Serialize};

use crate::error::{GeoqueryError, Result};

/// GeoJSON-compatible geometry representation.
///
/// Directly maps to the GeoJSON `Point`/`LineString`/`Polygon` types with
/// coordinate arrays. Parsing rejects any other geometry type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point { coordinates: [x, y] }
    }

    /// Create a LineString geometry
    pub fn line_string(coords: Vec<[f64; 2]>) -> Self {
        Geometry::LineString { coordinates: coords }
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Parse and validate a GeoJSON value.
    ///
    /// Fails with [`GeoqueryError::InvalidGeometry`] naming the structural
    /// problem: unsupported `type`, wrong coordinate nesting, non-numeric
    /// values, too few positions, or an unclosed polygon ring.
    pub fn from_geojson(value: &serde_json::Value) -> Result<Self> {
        let type_name = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| GeoqueryError::invalid_geometry("missing or non-string `type` field"))?;

        match type_name {
            "Point" | "LineString" | "Polygon" => {}
            other => {
                return Err(GeoqueryError::invalid_geometry(format!(
                    "unsupported geometry type `{}`, expected Point, LineString, or Polygon",
                    other
                )));
            }
        }

        let geometry: Geometry = serde_json::from_value(value.clone()).map_err(|e| {
            GeoqueryError::invalid_geometry(format!("malformed `coordinates` for {}: {}", type_name, e))
        })?;

        geometry.validate()?;
        Ok(geometry)
    }

    /// Parse and validate a GeoJSON text document.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| GeoqueryError::invalid_geometry(format!("not valid JSON: {}", e)))?;
        Self::from_geojson(&value)
    }

    /// Serialize to a GeoJSON value. Exact inverse of [`Geometry::from_geojson`].
    pub fn to_geojson(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| GeoqueryError::Serialization(e.to_string()))
    }

    /// Serialize to GeoJSON text, the form the spatial engine consumes.
    pub fn to_geojson_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GeoqueryError::Serialization(e.to_string()))
    }

    /// Longitude of the geometry's first position.
    ///
    /// Used as the representative longitude when resolving a UTM zone.
    /// `None` only for a hand-built geometry with empty coordinates; parsed
    /// geometries always have at least one position.
    pub fn anchor_longitude(&self) -> Option<f64> {
        match self {
            Geometry::Point { coordinates } => Some(coordinates[0]),
            Geometry::LineString { coordinates } => coordinates.first().map(|c| c[0]),
            Geometry::Polygon { coordinates } => {
                coordinates.first().and_then(|ring| ring.first()).map(|c| c[0])
            }
        }
    }

    /// Check the structural invariants for this geometry.
    pub fn validate(&self) -> Result<()> {
        match self {
            Geometry::Point { coordinates } => validate_position(coordinates, "Point"),
            Geometry::LineString { coordinates } => {
                if coordinates.len() < 2 {
                    return Err(GeoqueryError::invalid_geometry(format!(
                        "LineString must have at least 2 positions, found {}",
                        coordinates.len()
                    )));
                }
                for (i, position) in coordinates.iter().enumerate() {
                    validate_position(position, &format!("LineString[{}]", i))?;
                }
                Ok(())
            }
            Geometry::Polygon { coordinates } => {
                if coordinates.is_empty() {
                    return Err(GeoqueryError::invalid_geometry(
                        "Polygon must have at least one ring",
                    ));
                }
                for (r, ring) in coordinates.iter().enumerate() {
                    validate_ring(ring, r)?;
                }
                Ok(())
            }
        }
    }
}

fn validate_position(position: &[f64; 2], location: &str) -> Result<()> {
    if !position[0].is_finite() || !position[1].is_finite() {
        return Err(GeoqueryError::invalid_geometry(format!(
            "{} coordinates must be finite, found ({}, {})",
            location, position[0], position[1]
        )));
    }
    Ok(())
}

fn validate_ring(ring: &[[f64; 2]], index: usize) -> Result<()> {
    if ring.len() < 4 {
        return Err(GeoqueryError::invalid_geometry(format!(
            "Polygon ring[{}] must have at least 4 positions, found {}",
            index,
            ring.len()
        )));
    }
    for (i, position) in ring.iter().enumerate() {
        validate_position(position, &format!("Polygon ring[{}][{}]", index, i))?;
    }
    // GeoJSON rings are closed: first position == last position.
    if ring.first() != ring.last() {
        return Err(GeoqueryError::invalid_geometry(format!(
            "Polygon ring[{}] is not closed (first position != last position)",
            index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Geometry {
        Geometry::polygon(vec![vec![
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ]])
    }

    #[test]
    fn test_point_roundtrip() {
        let geom = Geometry::point(77.003912, 28.377525);
        let text = geom.to_geojson_string().unwrap();
        assert!(text.contains("\"Point\""));

        let parsed = Geometry::from_geojson_str(&text).unwrap();
        assert_eq!(geom, parsed);
    }

    #[test]
    fn test_polygon_roundtrip_preserves_order() {
        let geom = unit_square();
        let value = geom.to_geojson().unwrap();
        let parsed = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geom, parsed);
        assert_eq!(value["coordinates"][0][1][1], serde_json::json!(1.0));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let value = serde_json::json!({
            "type": "MultiPolygon",
            "coordinates": []
        });
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(err.to_string().contains("MultiPolygon"));
    }

    #[test]
    fn test_rejects_missing_type() {
        let value = serde_json::json!({ "coordinates": [0.0, 0.0] });
        assert!(Geometry::from_geojson(&value).is_err());
    }

    #[test]
    fn test_rejects_wrong_nesting() {
        // Polygon coordinates given with LineString nesting depth.
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]
        });
        assert!(Geometry::from_geojson(&value).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_coordinates() {
        let value = serde_json::json!({
            "type": "Point",
            "coordinates": ["77.0", "28.3"]
        });
        assert!(Geometry::from_geojson(&value).is_err());
    }

    #[test]
    fn test_rejects_unclosed_ring() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]
        });
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn test_rejects_short_ring() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        });
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn test_rejects_short_line_string() {
        let value = serde_json::json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0]]
        });
        assert!(Geometry::from_geojson(&value).is_err());
    }

    #[test]
    fn test_anchor_longitude() {
        assert_eq!(Geometry::point(77.0, 28.3).anchor_longitude(), Some(77.0));
        assert_eq!(unit_square().anchor_longitude(), Some(0.0));
        assert_eq!(
            Geometry::line_string(vec![[12.5, 41.9], [12.6, 41.8]]).anchor_longitude(),
            Some(12.5)
        );
    }
}

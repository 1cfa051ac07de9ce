//! Per-operation SQL builders and result decoding.
//!
//! Every handler follows the same shape: serialize the input geometry to
//! GeoJSON text, bind it into the operation's SQL template, execute through
//! the shared session, decode the single result row. Geometry payloads are
//! always bound as `$n` parameters; the only interpolated fragment is the
//! numeric EPSG code the buffer reprojection needs, which is computed and
//! validated before the statement text exists.

use sqlx::postgres::PgRow;
use sqlx::Row;

use geoquery_core::error::{GeoqueryError, Result};
use geoquery_core::models::{
    AreaResult, ContainmentResult, DistanceResult, Geometry, IntersectionResult,
};
use geoquery_geo::utm_epsg;

use crate::session::SpatialEngine;

const AREA_SQL: &str = r#"
WITH area_calc AS (
    SELECT ST_Area(ST_GeomFromGeoJSON($1)::geography) AS area
)
SELECT area,
       area / 4046.86 AS area_acres,
       area / 10000 AS area_hectares
FROM area_calc
"#;

const CENTROID_SQL: &str = r#"
WITH centroid_calc AS (
    SELECT ST_Centroid(ST_GeomFromGeoJSON($1)) AS centroid
)
SELECT ST_X(centroid) AS longitude,
       ST_Y(centroid) AS latitude
FROM centroid_calc
"#;

const DISTANCE_SQL: &str = r#"
WITH distance_calc AS (
    SELECT ST_Distance(
        ST_GeomFromGeoJSON($1)::geography,
        ST_GeomFromGeoJSON($2)::geography
    ) AS distance
)
SELECT distance
FROM distance_calc
"#;

const CONTAINS_SQL: &str = r#"
SELECT CASE
    WHEN ST_GeometryType(container) <> 'ST_Polygon' THEN false
    ELSE ST_Contains(container, target)
END AS is_contained
FROM (
    SELECT ST_GeomFromGeoJSON($1) AS container,
           ST_GeomFromGeoJSON($2) AS target
) AS geoms
"#;

const INTERSECTION_SQL: &str = r#"
WITH intersection_calc AS (
    SELECT ST_Intersects(g1, g2) AS intersects,
           ST_Intersection(g1, g2) AS intersection_geom
    FROM (
        SELECT ST_GeomFromGeoJSON($1) AS g1,
               ST_GeomFromGeoJSON($2) AS g2
    ) AS geoms
)
SELECT intersects,
       CASE
           WHEN intersects THEN ST_AsGeoJSON(intersection_geom)
       END AS intersection
FROM intersection_calc
"#;

/// The reprojection target is per-request, so the statement text is built at
/// call time around the resolved EPSG code.
fn buffer_sql(epsg: u32) -> String {
    format!(
        r#"
WITH input AS (
    SELECT ST_SetSRID(ST_GeomFromGeoJSON($1), 4326) AS geom
),
buffer_calc AS (
    SELECT ST_Buffer(ST_Transform(geom, {epsg}), $2) AS buffered
    FROM input
)
SELECT ST_AsGeoJSON(ST_Transform(buffered, 4326)) AS buffered_geojson
FROM buffer_calc
"#
    )
}

/// Spheroidal area in m² with acre and hectare conversions.
///
/// A non-polygon geometry has zero area; the engine reports 0 and the result
/// stays structured rather than failing.
pub(crate) async fn area(engine: &SpatialEngine, geom: &Geometry) -> Result<AreaResult> {
    let pool = engine.acquire().await?;
    let geom_text = geom.to_geojson_string()?;

    let row = engine.timed(sqlx::query(AREA_SQL).bind(&geom_text).fetch_one(&pool)).await?;

    Ok(AreaResult {
        area: get_f64(&row, "area")?,
        area_acres: get_f64(&row, "area_acres")?,
        area_hectares: get_f64(&row, "area_hectares")?,
    })
}

/// Geometric centroid as a `[longitude, latitude]` point.
pub(crate) async fn centroid(engine: &SpatialEngine, geom: &Geometry) -> Result<Geometry> {
    let pool = engine.acquire().await?;
    let geom_text = geom.to_geojson_string()?;

    let row = engine.timed(sqlx::query(CENTROID_SQL).bind(&geom_text).fetch_one(&pool)).await?;

    Ok(Geometry::point(get_f64(&row, "longitude")?, get_f64(&row, "latitude")?))
}

/// Planar buffer of `distance` meters, computed in the UTM zone of the
/// geometry's anchor longitude and reprojected back to EPSG:4326.
///
/// Known accuracy limit: geometries spanning a UTM zone boundary or sitting
/// near the poles are buffered in the single zone the anchor longitude
/// selects.
pub(crate) async fn buffer(
    engine: &SpatialEngine,
    geom: &Geometry,
    distance: f64,
) -> Result<Geometry> {
    let longitude = geom
        .anchor_longitude()
        .ok_or_else(|| GeoqueryError::invalid_geometry("geometry has no coordinates"))?;
    let epsg = utm_epsg(longitude, engine.config().hemisphere)?;

    let pool = engine.acquire().await?;
    let geom_text = geom.to_geojson_string()?;
    let sql = buffer_sql(epsg);

    let row = engine
        .timed(sqlx::query(&sql).bind(&geom_text).bind(distance).fetch_one(&pool))
        .await?;

    let buffered = get_string(&row, "buffered_geojson")?;
    Geometry::from_geojson_str(&buffered).map_err(|e| GeoqueryError::QueryExecution {
        reason: format!("buffer did not return a usable geometry: {}", e),
    })
}

/// Geodesic distance in meters, rounded to two decimals. Overlapping
/// geometries are at distance 0.
pub(crate) async fn distance(
    engine: &SpatialEngine,
    geom1: &Geometry,
    geom2: &Geometry,
) -> Result<DistanceResult> {
    let pool = engine.acquire().await?;
    let geom1_text = geom1.to_geojson_string()?;
    let geom2_text = geom2.to_geojson_string()?;

    let row = engine
        .timed(sqlx::query(DISTANCE_SQL).bind(&geom1_text).bind(&geom2_text).fetch_one(&pool))
        .await?;

    let meters = get_f64(&row, "distance")?;
    Ok(DistanceResult::meters((meters * 100.0).round() / 100.0))
}

/// Containment test. A container that is not topologically a polygon
/// short-circuits to `false` inside the statement instead of raising an
/// engine type error.
pub(crate) async fn point_in_polygon(
    engine: &SpatialEngine,
    container: &Geometry,
    target: &Geometry,
) -> Result<ContainmentResult> {
    let pool = engine.acquire().await?;
    let container_text = container.to_geojson_string()?;
    let target_text = target.to_geojson_string()?;

    let row = engine
        .timed(sqlx::query(CONTAINS_SQL).bind(&container_text).bind(&target_text).fetch_one(&pool))
        .await?;

    Ok(ContainmentResult { is_contained: get_bool(&row, "is_contained")? })
}

/// Boolean intersects test plus, only when true, the intersection geometry.
pub(crate) async fn intersection(
    engine: &SpatialEngine,
    geom1: &Geometry,
    geom2: &Geometry,
) -> Result<IntersectionResult> {
    let pool = engine.acquire().await?;
    let geom1_text = geom1.to_geojson_string()?;
    let geom2_text = geom2.to_geojson_string()?;

    let row = engine
        .timed(sqlx::query(INTERSECTION_SQL).bind(&geom1_text).bind(&geom2_text).fetch_one(&pool))
        .await?;

    let intersects = get_bool(&row, "intersects")?;
    let intersection = match get_opt_string(&row, "intersection")? {
        Some(text) => Some(Geometry::from_geojson_str(&text).map_err(|e| {
            GeoqueryError::QueryExecution {
                reason: format!("intersection did not return a usable geometry: {}", e),
            }
        })?),
        None => None,
    };

    Ok(IntersectionResult { intersects, intersection })
}

fn get_f64(row: &PgRow, column: &str) -> Result<f64> {
    row.try_get(column).map_err(|e| decode_error(column, e))
}

fn get_bool(row: &PgRow, column: &str) -> Result<bool> {
    row.try_get(column).map_err(|e| decode_error(column, e))
}

fn get_string(row: &PgRow, column: &str) -> Result<String> {
    row.try_get(column).map_err(|e| decode_error(column, e))
}

fn get_opt_string(row: &PgRow, column: &str) -> Result<Option<String>> {
    row.try_get(column).map_err(|e| decode_error(column, e))
}

fn decode_error(column: &str, e: sqlx::Error) -> GeoqueryError {
    GeoqueryError::QueryExecution { reason: format!("failed to decode column `{}`: {}", column, e) }
}

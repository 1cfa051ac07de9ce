//! geoquery-geo - UTM zone resolution and result-row normalization
//!
//! This crate holds the two pure pieces of coordinate handling: resolving a
//! UTM EPSG code from a longitude, and converting raw engine result rows into
//! canonical GeoJSON with the axis-order correction applied at a single seam.

pub mod normalize;
pub mod utm;

pub use normalize::{normalize_rows, swap_axis_order};
pub use utm::{utm_epsg, Hemisphere};

//! UTM zone resolution.
//!
//! UTM zones are 6 degrees of longitude wide, numbered 1..=60 starting at
//! -180. The EPSG code for a zone is `base + zone` where the base depends on
//! the hemisphere: 32600 for northern-hemisphere zones, 32700 for southern.

use std::fmt;
use std::str::FromStr;

use geoquery_core::error::{GeoqueryError, Result};

/// Hemisphere selecting the EPSG base for UTM codes.
///
/// The buffer operation projects into the zone of the geometry's anchor
/// longitude; which hemisphere base applies is a deployment decision, so it
/// is carried as configuration rather than baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

impl Hemisphere {
    pub fn epsg_base(&self) -> u32 {
        match self {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => f.write_str("north"),
            Hemisphere::South => f.write_str("south"),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = GeoqueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Hemisphere::North),
            "south" | "s" => Ok(Hemisphere::South),
            other => Err(GeoqueryError::ConfigInvalid {
                key: "hemisphere".to_string(),
                reason: format!("expected `north` or `south`, found `{}`", other),
            }),
        }
    }
}

/// Resolve the UTM EPSG code for a longitude.
///
/// `zone = floor((longitude + 180) / 6) + 1`, clamped to 60 so the
/// antimeridian itself stays in the last zone. Fails with
/// [`GeoqueryError::OutOfRange`] when the longitude is outside [-180, 180].
pub fn utm_epsg(longitude: f64, hemisphere: Hemisphere) -> Result<u32> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoqueryError::OutOfRange { longitude });
    }

    let zone = (((longitude + 180.0) / 6.0).floor() as u32 + 1).min(60);
    Ok(hemisphere.epsg_base() + zone)
}

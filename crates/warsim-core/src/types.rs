//! Fundamental identifiers and geographic types.
//!
//! Positions are geographic (degrees). All distance and bearing math uses a
//! local flat-earth approximation, which is fine at tactical ranges
//! (< 100 km) and wrong globally. No geodesic correction is performed.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::METERS_PER_DEGREE_LAT;

/// Opaque unit identity. Preserved across clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u64);

/// Opaque projectile identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectileId(pub u64);

/// Faction identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FactionId(pub i32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projectile-{}", self.0)
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction-{}", self.0)
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Local displacement to `other` in meters: x = East, y = North.
    ///
    /// Longitude is scaled at the mean latitude of both points.
    pub fn offset_to(&self, other: &GeoPosition) -> DVec2 {
        let north = (other.latitude - self.latitude) * METERS_PER_DEGREE_LAT;
        let mean_lat = ((self.latitude + other.latitude) / 2.0).to_radians();
        let east = (other.longitude - self.longitude) * METERS_PER_DEGREE_LAT * mean_lat.cos();
        DVec2::new(east, north)
    }

    /// Flat-earth distance in meters.
    pub fn distance_to(&self, other: &GeoPosition) -> f64 {
        self.offset_to(other).length()
    }

    /// Bearing to another position in degrees (0 = North, clockwise, [0, 360)).
    pub fn bearing_to(&self, other: &GeoPosition) -> f64 {
        let offset = self.offset_to(other);
        normalize_heading(offset.x.atan2(offset.y).to_degrees())
    }

    /// Position reached by travelling `distance_m` meters along `heading_deg`.
    pub fn advanced(&self, heading_deg: f64, distance_m: f64) -> GeoPosition {
        let heading = heading_deg.to_radians();
        let step = DVec2::new(heading.sin(), heading.cos()) * distance_m;

        let meters_per_deg_lon = METERS_PER_DEGREE_LAT * self.latitude.to_radians().cos();
        let d_lat = step.y / METERS_PER_DEGREE_LAT;
        let d_lon = if meters_per_deg_lon.abs() < 1e-6 {
            0.0
        } else {
            step.x / meters_per_deg_lon
        };

        GeoPosition::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

/// Wrap a heading in degrees into [0, 360).
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

//! Scalar unit conversions between angular distances on the earth sphere and
//! the distance units used around a flight plan (kilometers, nautical miles).
//!
//! All geometry in this crate is computed in radians on a sphere of radius
//! [`EARTH_RADIUS_M`]. Conversions happen at the edges only.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Earth mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// One nautical mile in meters.
pub const NAUTICAL_MILE_M: f64 = 1852.0;

const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

pub fn rad_to_nm(radians: f64) -> f64 {
    radians * EARTH_RADIUS_M / NAUTICAL_MILE_M
}

pub fn nm_to_rad(nm: f64) -> f64 {
    nm * NAUTICAL_MILE_M / EARTH_RADIUS_M
}

pub fn rad_to_km(radians: f64) -> f64 {
    radians * EARTH_RADIUS_M / 1000.0
}

pub fn km_to_rad(km: f64) -> f64 {
    km * 1000.0 / EARTH_RADIUS_M
}

pub fn km_to_nm(km: f64) -> f64 {
    km * 1000.0 / NAUTICAL_MILE_M
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * DEGREES_PER_RADIAN
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees / DEGREES_PER_RADIAN
}

/// Unit in which a distance argument or result is expressed.
///
/// Replaces free-standing converter functions: every API that accepts a length
/// takes the unit alongside it and converts to radians internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Central angle on the unit sphere.
    Radians,
    Kilometers,
    #[default]
    NauticalMiles,
    /// Central angle expressed in degrees.
    Degrees,
}

impl DistanceUnit {
    /// Converts `value`, expressed in this unit, to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Radians => value,
            DistanceUnit::Kilometers => km_to_rad(value),
            DistanceUnit::NauticalMiles => nm_to_rad(value),
            DistanceUnit::Degrees => deg_to_rad(value),
        }
    }

    /// Converts a value in radians to this unit.
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            DistanceUnit::Radians => radians,
            DistanceUnit::Kilometers => rad_to_km(radians),
            DistanceUnit::NauticalMiles => rad_to_nm(radians),
            DistanceUnit::Degrees => rad_to_deg(radians),
        }
    }
}

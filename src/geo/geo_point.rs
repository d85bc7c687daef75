//! Immutable geographic point and the great-circle primitives the rest of the
//! crate is built on.
//!
//! The earth is modelled as a sphere of radius [`EARTH_RADIUS_M`]; every
//! distance returned here is a central angle in radians unless a
//! [`DistanceUnit`] is passed explicitly.
//!
//! [`EARTH_RADIUS_M`]: crate::geo::units::EARTH_RADIUS_M

use crate::geo::coordinates::{
    format_dm, format_rounded_dm, parse_arinc_label, parse_degrees_minutes,
    parse_degrees_minutes_pair,
};
use crate::geo::error::CoordinateParseError;
use crate::geo::units::{deg_to_rad, rad_to_deg, DistanceUnit};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// A point on the earth sphere, optionally named (waypoint or station label).
///
/// The radians representation is derived once at construction. Two points
/// compare equal when latitude and longitude agree to 6 decimal places
/// (about 0.11 m); names and descriptions are ignored.
///
/// # Examples
///
/// ```
/// use gramet_route::GeoPoint;
///
/// let paris = GeoPoint::new(49.0097, 2.5479).with_name("LFPG");
/// let new_york = GeoPoint::new(40.6398, -73.7789).with_name("KJFK");
/// let nm = paris.distance_in(&new_york, gramet_route::DistanceUnit::NauticalMiles);
/// assert!((nm - 3150.0).abs() < 20.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GeoPointRecord", into = "GeoPointRecord")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
    phi: f64,
    lambda: f64,
    name: String,
    description: String,
}

#[derive(Serialize, Deserialize)]
struct GeoPointRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

impl From<GeoPointRecord> for GeoPoint {
    fn from(record: GeoPointRecord) -> Self {
        GeoPoint::new(record.latitude, record.longitude)
            .with_name(record.name)
            .with_description(record.description)
    }
}

impl From<GeoPoint> for GeoPointRecord {
    fn from(point: GeoPoint) -> Self {
        GeoPointRecord {
            latitude: point.latitude,
            longitude: point.longitude,
            name: point.name,
            description: point.description,
        }
    }
}

/// Floored modulo, rounded to 8 significant digits so values sitting on the
/// `b` boundary do not flicker between `0` and `b`.
fn fmod(a: f64, b: f64) -> f64 {
    round_significant(a - (a / b).floor() * b, 8)
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}

fn equality_key(degrees: f64) -> i64 {
    (degrees * 1e6).round() as i64
}

impl GeoPoint {
    /// Creates an unnamed point from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
            phi: deg_to_rad(latitude),
            lambda: deg_to_rad(longitude),
            name: String::new(),
            description: String::new(),
        }
    }

    /// Alias of [`GeoPoint::new`] for symmetry with the text parsers.
    pub fn from_decimal_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude)
    }

    /// Creates an unnamed point from latitude `phi` and longitude `lambda` in radians.
    pub fn from_radians(phi: f64, lambda: f64) -> Self {
        GeoPoint {
            latitude: rad_to_deg(phi),
            longitude: rad_to_deg(lambda),
            phi,
            lambda,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Parses a packed degrees/minutes pair such as `N4038.4W07346.7`.
    pub fn from_degrees_minutes(text: &str) -> Result<Self, CoordinateParseError> {
        let (latitude, longitude) = parse_degrees_minutes(text)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Parses split degrees/minutes values such as `("N4038.4", "W07346.7")`.
    pub fn from_degrees_minutes_pair(
        latitude: &str,
        longitude: &str,
    ) -> Result<Self, CoordinateParseError> {
        let (latitude, longitude) = parse_degrees_minutes_pair(latitude, longitude)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Parses an ARINC 424 coordinate label (`55N020W`, `N5520`, `5N520`, ...).
    ///
    /// The point is left unnamed; chain [`GeoPoint::with_name`] to keep the label.
    pub fn from_arinc_label(label: &str) -> Result<Self, CoordinateParseError> {
        let (latitude, longitude) = parse_arinc_label(label)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Returns the same position with a new (trimmed) name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = name.trim().to_string();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in radians.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Longitude in radians.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Degrees/minutes display form, e.g. `N4530.5E00118.0`.
    pub fn dm(&self) -> String {
        format_dm(self.latitude, self.longitude)
    }

    /// Whole-minute display form, e.g. `N4530E00118`.
    pub fn rounded_dm(&self) -> String {
        format_rounded_dm(self.latitude, self.longitude)
    }

    fn unit_vector(&self) -> [f64; 3] {
        let cos_phi = self.phi.cos();
        [
            cos_phi * self.lambda.cos(),
            cos_phi * self.lambda.sin(),
            self.phi.sin(),
        ]
    }

    fn from_vector(x: f64, y: f64, z: f64) -> Self {
        let phi = z.atan2((x * x + y * y).sqrt());
        let lambda = y.atan2(x);
        Self::from_radians(phi, lambda)
    }

    /// Great-circle distance in radians (spherical law of cosines).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        if self.phi == other.phi && self.lambda == other.lambda {
            return 0.0;
        }
        let cosine = self.phi.sin() * other.phi.sin()
            + self.phi.cos() * other.phi.cos() * (other.lambda - self.lambda).cos();
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// Great-circle distance expressed in `unit`.
    pub fn distance_in(&self, other: &GeoPoint, unit: DistanceUnit) -> f64 {
        unit.from_radians(self.distance_to(other))
    }

    /// Initial course towards `other`, in radians within `[0, 2π)`.
    ///
    /// Uses the aviation formulary convention where longitudes grow westward,
    /// so with east-positive coordinates a point due east reports `3π/2`.
    /// Only differences of courses are meaningful to the matcher.
    pub fn course_to(&self, other: &GeoPoint) -> f64 {
        let (phi1, lambda1) = (self.phi, self.lambda);
        let (phi2, lambda2) = (other.phi, other.lambda);
        fmod(
            ((lambda1 - lambda2).sin() * phi2.cos()).atan2(
                phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * (lambda1 - lambda2).cos(),
            ),
            TAU,
        )
    }

    /// Signed cross-track distance in radians of this point from the great
    /// circle through `start` and `end`. The sign tells on which side of the
    /// track the point lies.
    pub fn cross_track_distance_to(&self, start: &GeoPoint, end: &GeoPoint) -> f64 {
        let course_track = start.course_to(end);
        let course_point = start.course_to(self);
        let distance = start.distance_to(self);
        (distance.sin() * (course_point - course_track).sin()).asin()
    }

    /// Point at `fraction` (0 = self, 1 = other) along the great circle to `other`.
    ///
    /// `distance` may carry a precomputed [`GeoPoint::distance_to`] result to
    /// avoid recomputing it inside loops. Coincident points yield a copy of
    /// this position.
    pub fn at_fraction(&self, other: &GeoPoint, fraction: f64, distance: Option<f64>) -> GeoPoint {
        let d = distance.unwrap_or_else(|| self.distance_to(other));
        let sin_d = d.sin();
        if sin_d == 0.0 {
            return GeoPoint::from_radians(self.phi, self.lambda);
        }
        let a = ((1.0 - fraction) * d).sin() / sin_d;
        let b = (fraction * d).sin() / sin_d;
        let [x1, y1, z1] = self.unit_vector();
        let [x2, y2, z2] = other.unit_vector();
        Self::from_vector(a * x1 + b * x2, a * y1 + b * y2, a * z1 + b * z2)
    }

    /// `steps + 1` points on the circle of `radius` around this point, the last
    /// one closing on the first.
    pub fn circle(&self, radius: f64, unit: DistanceUnit, steps: usize) -> Vec<GeoPoint> {
        let d = unit.to_radians(radius);
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.destination(d, i as f64 * TAU / steps as f64))
            .collect()
    }

    // Destination at distance `d` on true course `course`, longitude west-positive.
    fn destination(&self, d: f64, course: f64) -> GeoPoint {
        let (phi1, lambda1) = (self.phi, self.lambda);
        let phi = (phi1.sin() * d.cos() + phi1.cos() * d.sin() * course.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let mut lambda = lambda1;
        if phi.cos() != 0.0 {
            let mut delta = (course.sin() * d.sin() / phi.cos()).clamp(-1.0, 1.0).asin();
            if lambda1 - delta < -PI {
                delta = lambda1 + PI;
            }
            lambda = fmod(lambda1 - delta + PI, TAU) - PI;
        }
        GeoPoint::from_radians(phi, lambda)
    }

    /// Center of `points` computed as the normalized mean of their unit
    /// vectors, which stays correct across the antimeridian and near the poles.
    /// Returns `None` for an empty slice.
    pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let count = points.len() as f64;
        let [x, y, z] = points.iter().fold([0.0; 3], |acc, point| {
            let [px, py, pz] = point.unit_vector();
            [acc[0] + px, acc[1] + py, acc[2] + pz]
        });
        Some(Self::from_vector(x / count, y / count, z / count))
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        equality_key(self.latitude) == equality_key(other.latitude)
            && equality_key(self.longitude) == equality_key(other.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
        } else {
            write!(
                f,
                "{} ({:.6}, {:.6})",
                self.name, self.latitude, self.longitude
            )
        }
    }
}

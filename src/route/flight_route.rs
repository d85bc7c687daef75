//! Ordered polyline of [`GeoPoint`]s: a flight-plan route, a resampled route or
//! a sequence of weather stations.

use crate::geo::geo_point::GeoPoint;
use crate::geo::units::DistanceUnit;
use serde::{Deserialize, Serialize};

/// An ordered sequence of points with a name and a description.
///
/// Routes are values: transformations such as [`Route::split`] build a new
/// route and leave the original untouched. Equality compares points only
/// (see [`GeoPoint`] equality), never the name or description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<GeoPoint>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Route {
            points,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// Consecutive point pairs: `[a, b, c]` gives `(a, b), (b, c)`.
    /// Empty and single-point routes have no segment.
    pub fn segments(&self) -> impl Iterator<Item = (&GeoPoint, &GeoPoint)> + '_ {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Total length along the segments, in `unit`.
    pub fn distance(&self, unit: DistanceUnit) -> f64 {
        let radians: f64 = self.segments().map(|(a, b)| a.distance_to(b)).sum();
        unit.from_radians(radians)
    }

    /// Names of the named points, in route order.
    pub fn labels(&self) -> Vec<&str> {
        self.points
            .iter()
            .map(GeoPoint::name)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<GeoPoint> for Route {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Route::new(iter.into_iter().collect())
    }
}

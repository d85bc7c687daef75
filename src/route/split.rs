//! Resampling of a [`Route`] into segments no longer than a given length.

use crate::geo::geo_point::GeoPoint;
use crate::geo::units::DistanceUnit;
use crate::route::flight_route::Route;
use bon::Builder;

/// Options for [`Route::split`].
///
/// # Examples
///
/// ```
/// use gramet_route::{DistanceUnit, SplitOptions};
///
/// let options = SplitOptions::builder()
///     .unit(DistanceUnit::Kilometers)
///     .preserve_vertices(true)
///     .name("resampled")
///     .build();
/// assert!(options.preserve_vertices);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SplitOptions {
    /// Unit of the `max_length` argument. Defaults to nautical miles.
    #[builder(default)]
    pub unit: DistanceUnit,
    /// Keep every original vertex, even when that yields sub-segments shorter
    /// than `max_length`.
    #[builder(default)]
    pub preserve_vertices: bool,
    /// Name of the generated route.
    #[builder(default, into)]
    pub name: String,
    /// Description of the generated route.
    #[builder(default, into)]
    pub description: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions::builder().build()
    }
}

/// Residuals smaller than this, in the caller's unit, count as zero.
const RESIDUAL_TOLERANCE: f64 = 1e-10;

impl Route {
    /// Inserts great-circle points every `max_length` (in `options.unit`).
    ///
    /// Without `preserve_vertices`, the distance left over at the end of a
    /// segment is carried into the next one, so inner vertices are dropped
    /// unless they fall on a multiple of `max_length`. With it, every original
    /// vertex is emitted and the carried distance restarts at zero. The first
    /// and last points are always kept. An emitted point landing on an
    /// original vertex is the vertex itself, name included.
    ///
    /// Routes of fewer than two points, or a non-positive `max_length`, come
    /// back with their points unchanged.
    pub fn split(&self, max_length: f64, options: &SplitOptions) -> Route {
        let step = options.unit.to_radians(max_length);
        let points = if self.points.len() < 2 || !(step > 0.0) || !step.is_finite() {
            self.points.clone()
        } else {
            let tolerance = options.unit.to_radians(RESIDUAL_TOLERANCE);
            split_points(&self.points, step, tolerance, options.preserve_vertices)
        };
        Route::new(points)
            .with_name(options.name.clone())
            .with_description(options.description.clone())
    }
}

// The carried residual stays unrounded; only values within `tolerance` of zero
// are snapped, so a step ending on a vertex emits the vertex itself.
fn split_points(
    vertices: &[GeoPoint],
    step: f64,
    tolerance: f64,
    preserve_vertices: bool,
) -> Vec<GeoPoint> {
    let mut points = vec![vertices[0].clone()];
    let mut remaining = 0.0;
    let mut last = &vertices[0];

    for pair in vertices.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let segment_length = start.distance_to(end);
        let mut covered = remaining;
        while segment_length - covered - step > -tolerance {
            covered += step;
            if (segment_length - covered).abs() < tolerance {
                points.push(end.clone());
            } else {
                points.push(start.at_fraction(end, covered / segment_length, Some(segment_length)));
            }
        }
        remaining = covered - segment_length;
        if remaining.abs() < tolerance {
            remaining = 0.0;
        }
        if preserve_vertices && remaining != 0.0 {
            points.push(end.clone());
            remaining = 0.0;
        }
        last = end;
    }
    if remaining != 0.0 {
        points.push(last.clone());
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude)
    }

    fn radians() -> SplitOptions {
        SplitOptions::builder().unit(DistanceUnit::Radians).build()
    }

    fn preserving() -> SplitOptions {
        SplitOptions::builder()
            .unit(DistanceUnit::Radians)
            .preserve_vertices(true)
            .build()
    }

    #[test]
    fn test_split_empty_and_single() {
        assert!(Route::default().split(60.0, &SplitOptions::default()).is_empty());
        let single = Route::new(vec![p(10.0, 10.0)]);
        assert_eq!(single.split(60.0, &SplitOptions::default()), single);
    }

    #[test]
    fn test_split_at_half_distance_inserts_middle() {
        let start = p(0.0, 0.0);
        let middle = p(0.0, 45.0);
        let end = p(0.0, 90.0);
        let route = Route::new(vec![start.clone(), end.clone()]);
        let size = route.distance(DistanceUnit::Radians) / 2.0;
        assert_eq!(
            route.split(size, &radians()),
            Route::new(vec![start, middle, end])
        );
    }

    #[test]
    fn test_split_reproduces_existing_vertex() {
        let route = Route::new(vec![p(0.0, 0.0), p(0.0, 45.0).with_name("MID"), p(0.0, 90.0)]);
        let size = route.distance(DistanceUnit::Radians) / 2.0;
        for options in [radians(), preserving()] {
            let split = route.split(size, &options);
            assert_eq!(split, route);
            assert_eq!(split.points[1].name(), "MID");
        }
    }

    #[test]
    fn test_split_preserve_vertices() {
        let start = p(0.0, 0.0);
        let a = p(0.0, 10.0);
        let b = p(0.0, 55.0);
        let middle = p(0.0, 45.0);
        let end = p(0.0, 90.0);
        let size = std::f64::consts::PI / 4.0;

        let route = Route::new(vec![start.clone(), a.clone(), end.clone()]);
        // the carried distance skips `a`
        assert_eq!(
            route.split(size, &radians()),
            Route::new(vec![start.clone(), middle.clone(), end.clone()])
        );
        // `a` is kept, the count restarts from it and lands on `b`
        assert_eq!(
            route.split(size, &preserving()),
            Route::new(vec![start.clone(), a.clone(), b, end.clone()])
        );

        let route = Route::new(vec![start.clone(), a.clone(), middle.clone(), end.clone()]);
        assert_eq!(
            route.split(size, &radians()),
            Route::new(vec![start.clone(), middle.clone(), end.clone()])
        );
        assert_eq!(
            route.split(size, &preserving()),
            Route::new(vec![start, a, middle, end])
        );
    }

    #[test]
    fn test_split_keeps_length() {
        let route = Route::new(vec![p(49.0097, 2.5479), p(40.6398, -73.7789)]);
        let total = route.distance(DistanceUnit::NauticalMiles);
        for size in [1.0, 60.0, 123.4, 300.0, 5000.0] {
            let split = route.split(size, &SplitOptions::default());
            let length = split.distance(DistanceUnit::NauticalMiles);
            assert!((length - total).abs() < 1e-3, "size {size}: {length} != {total}");
            assert_eq!(split.points.first(), route.points.first());
            assert_eq!(split.points.last(), route.points.last());
            for (a, b) in split.segments() {
                assert!(a.distance_in(b, DistanceUnit::NauticalMiles) <= size + 1e-6);
            }
        }
    }

    #[test]
    fn test_split_long_route_does_not_drift() {
        // 360 one-degree hops around the equator, split every degree
        let vertices: Vec<GeoPoint> = (0..=360)
            .map(|i| p(0.0, f64::from(i) - 180.0))
            .collect();
        let route = Route::new(vertices.clone());
        let split = route.split(1.0, &SplitOptions::builder().unit(DistanceUnit::Degrees).build());
        assert_eq!(split.len(), vertices.len());
        assert_eq!(split, route);

        // 0.25 degree steps over 200 segments of 1.1 degree without preserving vertices
        let vertices: Vec<GeoPoint> = (0..=200)
            .map(|i| p(0.0, -110.0 + 1.1 * f64::from(i)))
            .collect();
        let route = Route::new(vertices);
        let split = route.split(0.25, &SplitOptions::builder().unit(DistanceUnit::Degrees).build());
        // 220 degrees / 0.25 = 880 steps, plus the start
        assert_eq!(split.len(), 881);
        for (a, b) in split.segments() {
            let length = a.distance_in(b, DistanceUnit::Degrees);
            assert!((length - 0.25).abs() < 1e-6, "segment of {length} degrees");
        }
        for (i, point) in split.points.iter().enumerate() {
            let expected = -110.0 + 0.25 * i as f64;
            assert!(
                (point.longitude() - expected).abs() < 1e-6,
                "point {i}: {} != {expected}",
                point.longitude()
            );
        }
    }

    #[test]
    fn test_split_preserving_long_route_keeps_all_vertices() {
        let vertices: Vec<GeoPoint> = (0..50)
            .map(|i| {
                p(40.0 + 0.3 * f64::from(i), -60.0 + 1.7 * f64::from(i)).with_name(format!("W{i:02}"))
            })
            .collect();
        let route = Route::new(vertices);
        let split = route.split(
            60.0,
            &SplitOptions::builder()
                .unit(DistanceUnit::Kilometers)
                .preserve_vertices(true)
                .name("dense")
                .build(),
        );
        assert_eq!(split.name, "dense");
        let labels = split.labels();
        let expected: Vec<String> = (0..50).map(|i| format!("W{i:02}")).collect();
        assert_eq!(labels, expected.iter().map(String::as_str).collect::<Vec<_>>());
        let original = route.distance(DistanceUnit::Kilometers);
        assert!((split.distance(DistanceUnit::Kilometers) - original).abs() < 1e-6);
    }

    #[test]
    fn test_split_ignores_non_positive_length() {
        let route = Route::new(vec![p(0.0, 0.0), p(0.0, 10.0)]);
        assert_eq!(route.split(0.0, &SplitOptions::default()), route);
        assert_eq!(route.split(-5.0, &SplitOptions::default()), route);
    }
}

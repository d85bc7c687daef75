//! Radius queries over the station dataset using the geohash grid: a query
//! scans the cell containing the point and its 8 neighbors only.

use crate::geo::geo_point::GeoPoint;
use crate::geo::units::{km_to_rad, rad_to_km};
use crate::stations::dataset::StationDataset;
use crate::stations::error::StationIndexError;
use crate::stations::geohash;
use ordered_float::OrderedFloat;

/// Approximate cell width in km for geohash precisions 1 to 8.
pub const GEOHASH_GRID_SIZE_KM: [f64; 8] = [5000.0, 1260.0, 156.0, 40.0, 4.8, 1.22, 0.152, 0.038];

pub const DEFAULT_PRECISION: u8 = 3;

/// Geohash-bucketed station index.
///
/// Immutable after construction, so one grid can serve any number of
/// concurrent matcher runs.
#[derive(Debug, Clone)]
pub struct StationGrid {
    precision: u8,
    grid_size: f64,
    dataset: StationDataset,
}

impl StationGrid {
    /// Builds a grid over `dataset`, whose keys must be geohashes of exactly
    /// `precision` characters.
    pub fn new(dataset: StationDataset, precision: u8) -> Result<Self, StationIndexError> {
        let grid_km = Self::grid_size_km(precision)?;
        if let Some(hash) = dataset.mismatched_cell(precision) {
            return Err(StationIndexError::PrecisionMismatch {
                hash: hash.to_string(),
                precision,
            });
        }
        Ok(StationGrid {
            precision,
            grid_size: km_to_rad(grid_km),
            dataset,
        })
    }

    /// Builds a grid at [`DEFAULT_PRECISION`] (cells of about 156 km).
    pub fn with_default_precision(dataset: StationDataset) -> Result<Self, StationIndexError> {
        Self::new(dataset, DEFAULT_PRECISION)
    }

    fn grid_size_km(precision: u8) -> Result<f64, StationIndexError> {
        match precision {
            1..=8 => Ok(GEOHASH_GRID_SIZE_KM[usize::from(precision) - 1]),
            _ => Err(StationIndexError::InvalidPrecision(precision)),
        }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Cell width in radians.
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Largest radius, in radians, a 9-cell scan answers exactly.
    pub fn max_radius(&self) -> f64 {
        self.grid_size / 2.0
    }

    pub fn dataset(&self) -> &StationDataset {
        &self.dataset
    }

    /// Coarsest-to-finest search for a precision whose half cell still covers
    /// `radius` (radians). `0` means no precision is coarse enough.
    pub fn suggested_precision(radius: f64) -> u8 {
        GEOHASH_GRID_SIZE_KM
            .iter()
            .position(|&size_km| radius > km_to_rad(size_km) / 2.0)
            .map_or(8, |index| index as u8)
    }

    /// Every station of the cell holding `point` and of its neighbors, the
    /// center cell first. A superset of any radius query, not filtered by
    /// distance.
    pub fn raw_neighbors<'a>(&'a self, point: &GeoPoint) -> impl Iterator<Item = GeoPoint> + 'a {
        let center = geohash::encode(
            point.latitude(),
            point.longitude(),
            usize::from(self.precision),
        );
        let mut cells = geohash::neighbors(&center);
        cells.insert(0, center);
        cells.into_iter().flat_map(move |hash| {
            self.dataset
                .cell(&hash)
                .iter()
                .map(|entry| entry.to_point())
        })
    }

    /// Stations within `radius` (radians) of `point`, as `(distance, station)`
    /// pairs sorted by increasing distance. Equal distances keep scan order.
    ///
    /// Fails with [`StationIndexError::RadiusTooLarge`] when `radius` exceeds
    /// half a cell: the 9-cell scan could then miss true matches.
    pub fn neighbors_within(
        &self,
        point: &GeoPoint,
        radius: f64,
    ) -> Result<Vec<(f64, GeoPoint)>, StationIndexError> {
        if radius > self.max_radius() {
            return Err(StationIndexError::RadiusTooLarge {
                radius_km: rad_to_km(radius),
                grid_km: rad_to_km(self.grid_size),
                suggested_precision: Self::suggested_precision(radius),
            });
        }
        let mut matches: Vec<(f64, GeoPoint)> = self
            .raw_neighbors(point)
            .filter_map(|station| {
                let distance = station.distance_to(point);
                (distance <= radius).then_some((distance, station))
            })
            .collect();
        matches.sort_by_key(|(distance, _)| OrderedFloat(*distance));
        Ok(matches)
    }
}

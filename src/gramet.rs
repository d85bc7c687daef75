//! Entry point tying the station grid, the matcher and request building together.

use crate::error::GrametError;
use crate::matcher::options::{MatchOptions, ReductionAlgorithm};
use crate::matcher::{match_route, match_stations};
use crate::request::GrametRequest;
use crate::route::flight_route::Route;
use crate::stations::dataset::StationDataset;
use crate::stations::grid::{StationGrid, DEFAULT_PRECISION};
use bon::bon;
use chrono::{DateTime, TimeDelta, Utc};
use std::path::Path;

/// Station matcher over a loaded station dataset.
///
/// The grid is read-only once built, so one `Gramet` can serve concurrent
/// callers behind a shared reference.
///
/// # Examples
///
/// ```
/// use gramet_route::{GeoPoint, Gramet, Route, StationDataset};
///
/// # fn main() -> Result<(), gramet_route::GrametError> {
/// let dataset = StationDataset::from_stations(
///     [("07157", 49.0097, 2.5479), ("07149", 48.7233, 2.3794)],
///     3,
/// );
/// let gramet = Gramet::from_dataset(dataset, None)?;
/// let route = Route::new(vec![
///     GeoPoint::new(49.0, 2.55).with_name("LFPG"),
///     GeoPoint::new(48.72, 2.38).with_name("LFPO"),
/// ]);
/// let stations = gramet.station_route().route(&route).call()?;
/// assert_eq!(stations.labels(), vec!["07157", "07149"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Gramet {
    grid: StationGrid,
}

#[bon]
impl Gramet {
    pub fn new(grid: StationGrid) -> Self {
        Self { grid }
    }

    /// Indexes `dataset` at `precision`, by default [`DEFAULT_PRECISION`].
    pub fn from_dataset(dataset: StationDataset, precision: Option<u8>) -> Result<Self, GrametError> {
        let grid = StationGrid::new(dataset, precision.unwrap_or(DEFAULT_PRECISION))?;
        Ok(Self::new(grid))
    }

    /// Loads a geohash-keyed station file, see [`StationDataset::from_path`].
    pub fn from_dataset_path(
        path: impl AsRef<Path>,
        precision: Option<u8>,
    ) -> Result<Self, GrametError> {
        let dataset = StationDataset::from_path(path.as_ref())?;
        Self::from_dataset(dataset, precision)
    }

    pub fn grid(&self) -> &StationGrid {
        &self.grid
    }

    /// Matches `route` to at most 21 stations.
    ///
    /// With `segment_nm` set, the result is split into display segments of that
    /// length (see [`match_route`]); otherwise only the stations are returned.
    /// Unset options take their [`MatchOptions`] defaults.
    #[builder]
    pub fn station_route(
        &self,
        route: &Route,
        #[builder(into)] name: Option<String>,
        #[builder(into)] description: Option<String>,
        algorithm: Option<ReductionAlgorithm>,
        excluded: Option<Vec<String>>,
        sample_km: Option<f64>,
        segment_nm: Option<f64>,
    ) -> Result<Route, GrametError> {
        let defaults = MatchOptions::default();
        let options = MatchOptions {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            sample_km: sample_km.unwrap_or(defaults.sample_km),
            segment_nm: segment_nm.unwrap_or(defaults.segment_nm),
            algorithm: algorithm.unwrap_or_default(),
            excluded: excluded.unwrap_or_default(),
        };
        let stations = match segment_nm {
            Some(_) => match_route(&self.grid, route, &options)?,
            None => match_stations(&self.grid, route, &options)?,
        };
        Ok(stations)
    }

    /// Matches `route` and wraps the display route into a [`GrametRequest`].
    ///
    /// The route description lists the station labels unless one is given.
    #[builder]
    pub fn request(
        &self,
        route: &Route,
        departure: DateTime<Utc>,
        flight_time: TimeDelta,
        flight_level: u32,
        #[builder(into)] name: Option<String>,
        algorithm: Option<ReductionAlgorithm>,
        excluded: Option<Vec<String>>,
    ) -> Result<GrametRequest, GrametError> {
        let options = MatchOptions {
            name: name.unwrap_or_default(),
            algorithm: algorithm.unwrap_or_default(),
            excluded: excluded.unwrap_or_default(),
            ..MatchOptions::default()
        };
        let mut display = match_route(&self.grid, route, &options)?;
        display.description = display.labels().join(" ");
        log::info!(
            "Gramet route {:?}: {}",
            display.name,
            display.description
        );
        Ok(GrametRequest::builder()
            .route(display)
            .departure(departure)
            .flight_time(flight_time)
            .flight_level(flight_level)
            .build())
    }
}

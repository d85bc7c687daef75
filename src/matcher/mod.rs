//! Route to station matching.
//!
//! The route is resampled every [`MatchOptions::sample_km`], each sample is
//! paired with its nearest station, and the pairs are thinned down to at most
//! [`STATION_BUDGET`] stations that still follow the shape of the route.

mod candidates;
pub mod error;
pub mod options;
mod simplify;

use crate::geo::units::{km_to_rad, DistanceUnit};
use crate::matcher::candidates::{keep_closest_per_station, nearest_station, MatchCandidate};
use crate::matcher::error::MatchError;
use crate::matcher::options::{MatchOptions, STATION_BUDGET};
use crate::route::flight_route::Route;
use crate::route::split::SplitOptions;
use crate::stations::grid::StationGrid;

// Margin keeping the lookup radius strictly inside half a grid cell.
const RADIUS_MARGIN_KM: f64 = 0.1;

/// Station lookup radius in radians: half a grid cell less 100 m. On grids
/// finer than precision 6 the margin is capped at half the cell radius, so the
/// radius stays positive.
fn lookup_radius(grid: &StationGrid) -> f64 {
    let max_radius = grid.max_radius();
    max_radius - km_to_rad(RADIUS_MARGIN_KM).min(max_radius / 2.0)
}

/// Ordered stations along `route`, at most [`STATION_BUDGET`] of them, with
/// distinct labels.
///
/// Samples with no station in reach are skipped, so a short or remote route
/// may yield fewer than two stations. The only error is a lookup radius the
/// grid cannot serve.
pub fn match_stations(
    grid: &StationGrid,
    route: &Route,
    options: &MatchOptions,
) -> Result<Route, MatchError> {
    let samples = route.split(
        options.sample_km,
        &SplitOptions::builder()
            .unit(DistanceUnit::Kilometers)
            .preserve_vertices(true)
            .build(),
    );
    let radius = lookup_radius(grid);

    let mut candidates: Vec<MatchCandidate> = Vec::with_capacity(samples.len());
    for sample in &samples {
        if let Some(candidate) = nearest_station(grid, sample, radius, &options.excluded)? {
            candidates.push(candidate);
        }
    }
    log::debug!(
        "{} samples, {} matched to a station",
        samples.len(),
        candidates.len()
    );

    let candidates = keep_closest_per_station(candidates);
    log::debug!("{} distinct stations", candidates.len());

    let candidates = simplify::simplify(candidates);
    log::debug!("{} stations after simplification", candidates.len());

    let candidates = simplify::reduce_to_budget(candidates, STATION_BUDGET, options.algorithm);
    if candidates.len() < 2 {
        log::warn!(
            "Only {} station(s) found along route {:?}",
            candidates.len(),
            route.name
        );
    }

    Ok(candidates
        .into_iter()
        .map(|candidate| candidate.station_point)
        .collect::<Route>()
        .with_name(options.name.clone())
        .with_description(options.description.clone()))
}

/// [`match_stations`] split into display segments of
/// [`MatchOptions::segment_nm`], station vertices preserved.
///
/// Inserted points are unnamed: the station list is the named points of the
/// result, see [`Route::labels`].
pub fn match_route(
    grid: &StationGrid,
    route: &Route,
    options: &MatchOptions,
) -> Result<Route, MatchError> {
    let stations = match_stations(grid, route, options)?;
    Ok(stations.split(
        options.segment_nm,
        &SplitOptions::builder()
            .unit(DistanceUnit::NauticalMiles)
            .preserve_vertices(true)
            .name(options.name.clone())
            .description(options.description.clone())
            .build(),
    ))
}

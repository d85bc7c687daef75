//! Pairing of route samples with their nearest station.

use crate::geo::geo_point::GeoPoint;
use crate::stations::error::StationIndexError;
use crate::stations::grid::StationGrid;
use std::collections::HashMap;

/// A route sample and the station chosen for it.
#[derive(Debug, Clone)]
pub(crate) struct MatchCandidate {
    pub route_point: GeoPoint,
    pub station_point: GeoPoint,
    /// Sample to station distance, in radians.
    pub distance: f64,
}

// Waypoints of the polar Tokyo routes that fall in a gap of the station
// dataset over the Bering sea; they are pinned to Shemya.
const POLAR_FALLBACK_WAYPOINTS: [&str; 6] = ["OPAKE", "NATES", "RMORE", "PLADO", "RAZLY", "PINSO"];
const POLAR_FALLBACK_STATION: (&str, f64, f64) = ("PASY", 52.71226, 174.1136);

/// Nearest station to `sample` within `radius` (radians), skipping
/// `excluded` labels.
///
/// A named sample that is itself one of the candidate stations matches itself
/// at distance 0. Unmatched samples near the known polar gap fall back to
/// [`POLAR_FALLBACK_STATION`]; any other unmatched sample yields `None`.
pub(crate) fn nearest_station(
    grid: &StationGrid,
    sample: &GeoPoint,
    radius: f64,
    excluded: &[String],
) -> Result<Option<MatchCandidate>, StationIndexError> {
    let mut neighbours = grid.neighbors_within(sample, radius)?;
    neighbours.retain(|(_, station)| !excluded.iter().any(|label| label == station.name()));

    if !sample.name().is_empty()
        && neighbours
            .iter()
            .any(|(_, station)| station.name() == sample.name())
    {
        return Ok(Some(MatchCandidate {
            route_point: sample.clone(),
            station_point: sample.clone(),
            distance: 0.0,
        }));
    }
    if let Some((distance, station)) = neighbours.into_iter().next() {
        return Ok(Some(MatchCandidate {
            route_point: sample.clone(),
            station_point: station,
            distance,
        }));
    }
    Ok(polar_fallback(sample))
}

fn polar_fallback(sample: &GeoPoint) -> Option<MatchCandidate> {
    if !POLAR_FALLBACK_WAYPOINTS.contains(&sample.name()) {
        return None;
    }
    let (label, latitude, longitude) = POLAR_FALLBACK_STATION;
    let station = GeoPoint::new(latitude, longitude).with_name(label);
    log::warn!(
        "No station near {}, falling back to {}",
        sample.name(),
        label
    );
    Some(MatchCandidate {
        distance: station.distance_to(sample),
        route_point: sample.clone(),
        station_point: station,
    })
}

/// Keeps, for each station label, only the candidate with the smallest
/// sample distance (the first one on ties). Route order is preserved.
pub(crate) fn keep_closest_per_station(candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    let mut best: HashMap<&str, usize> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        best.entry(candidate.station_point.name())
            .and_modify(|kept| {
                if candidates[*kept].distance > candidate.distance {
                    *kept = index;
                }
            })
            .or_insert(index);
    }
    let mut keep = vec![false; candidates.len()];
    for index in best.into_values() {
        keep[index] = true;
    }
    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, kept)| kept.then_some(candidate))
        .collect()
}

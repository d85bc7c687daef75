//! Shape-preserving simplification of matched candidates.

use crate::matcher::candidates::MatchCandidate;
use crate::matcher::options::ReductionAlgorithm;

/// Index of the first candidate in `start+1..end`, scanning from `end`, whose
/// route sample strays from the `start`-`end` station chord more than its
/// station strays from the local route leg.
///
/// Deviations larger than the leg itself are rejected: they come from near
/// antipodal chords, not from route shape.
fn find_strategic(candidates: &[MatchCandidate], start: usize, end: usize) -> Option<usize> {
    (start + 1..end).rev().find(|&k| {
        let sample = &candidates[k].route_point;
        let next_sample = &candidates[k + 1].route_point;
        let station_xtd = candidates[k]
            .station_point
            .cross_track_distance_to(sample, next_sample)
            .abs();
        let sample_xtd = sample
            .cross_track_distance_to(
                &candidates[start].station_point,
                &candidates[end].station_point,
            )
            .abs();
        sample_xtd > station_xtd && sample_xtd < sample.distance_to(next_sample)
    })
}

/// One pass: indices of the candidates to keep, first and last included.
fn simplify_pass(candidates: &[MatchCandidate]) -> Vec<usize> {
    let last = candidates.len() - 1;
    let mut kept = vec![0];
    let mut i = 0;
    while i < last {
        let strategic = (i + 2..=last).find_map(|j| find_strategic(candidates, i, j));
        match strategic {
            Some(k) => {
                let name = candidates[k].station_point.name();
                if !kept
                    .iter()
                    .any(|&index| candidates[index].station_point.name() == name)
                {
                    kept.push(k);
                }
                i = k;
            }
            None => i += 1,
        }
    }
    kept.push(last);
    kept
}

/// Repeats [`simplify_pass`] while it keeps shrinking the list.
pub(crate) fn simplify(mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    let max_passes = candidates.len();
    for pass in 0..max_passes {
        if candidates.len() <= 2 {
            break;
        }
        let kept = simplify_pass(&candidates);
        if kept.len() >= candidates.len() {
            break;
        }
        log::debug!(
            "Simplification pass {}: {} -> {} stations",
            pass + 1,
            candidates.len(),
            kept.len()
        );
        candidates = kept.into_iter().map(|k| candidates[k].clone()).collect();
    }
    candidates
}

fn lowest_xtd_index(candidates: &[MatchCandidate]) -> Option<usize> {
    lowest_score(candidates.len(), |i| {
        candidates[i]
            .route_point
            .cross_track_distance_to(
                &candidates[i - 1].station_point,
                &candidates[i + 1].station_point,
            )
            .abs()
    })
}

fn lowest_crs_index(candidates: &[MatchCandidate]) -> Option<usize> {
    lowest_score(candidates.len(), |i| {
        let previous = &candidates[i - 1].station_point;
        (previous.course_to(&candidates[i].station_point)
            - previous.course_to(&candidates[i + 1].station_point))
        .abs()
    })
}

// First inner index with the smallest score.
fn lowest_score(len: usize, score: impl Fn(usize) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in 1..len.saturating_sub(1) {
        let value = score(i);
        if best.map_or(true, |(_, lowest)| value < lowest) {
            best = Some((i, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Drops one inner candidate at a time, chosen by `algorithm`, until at most
/// `budget` remain. First and last candidates are never dropped.
pub(crate) fn reduce_to_budget(
    mut candidates: Vec<MatchCandidate>,
    budget: usize,
    algorithm: ReductionAlgorithm,
) -> Vec<MatchCandidate> {
    while candidates.len() > budget {
        let index = match algorithm {
            ReductionAlgorithm::Xtd => lowest_xtd_index(&candidates),
            ReductionAlgorithm::Crs => lowest_crs_index(&candidates),
        };
        let Some(index) = index else {
            break;
        };
        let removed = candidates.remove(index);
        log::trace!("Dropped {} ({})", removed.station_point.name(), algorithm);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::geo_point::GeoPoint;

    // Stations sit `offset` degrees north of samples spread along the equator.
    fn candidates(offsets: &[f64]) -> Vec<MatchCandidate> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let longitude = i as f64 * 0.5;
                MatchCandidate {
                    route_point: GeoPoint::new(0.0, longitude),
                    station_point: GeoPoint::new(*offset, longitude).with_name(format!("S{i:02}")),
                    distance: offset.abs().to_radians(),
                }
            })
            .collect()
    }

    fn names(candidates: &[MatchCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.station_point.name()).collect()
    }

    #[test]
    fn test_simplify_short_lists_unchanged() {
        assert!(simplify(Vec::new()).is_empty());
        assert_eq!(names(&simplify(candidates(&[0.1]))), vec!["S00"]);
        assert_eq!(names(&simplify(candidates(&[0.1, 0.2]))), vec!["S00", "S01"]);
    }

    #[test]
    fn test_simplify_collapses_straight_line() {
        // stations exactly on the route: nothing deviates from the end chord
        let result = simplify(candidates(&[0.0; 12]));
        assert_eq!(names(&result), vec!["S00", "S11"]);
    }

    #[test]
    fn test_simplify_keeps_order_and_ends() {
        let offsets = [0.2, -0.4, 0.6, -0.1, 0.3, -0.5, 0.05, 0.4, -0.3, 0.1];
        let input = candidates(&offsets);
        let result = simplify(input.clone());
        assert!(result.len() >= 2 && result.len() <= input.len());
        assert_eq!(result[0].station_point.name(), "S00");
        assert_eq!(result.last().unwrap().station_point.name(), "S09");
        let longitudes: Vec<f64> = result.iter().map(|c| c.route_point.longitude()).collect();
        assert!(longitudes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_find_strategic_picks_detour() {
        // the route bends far north at index 2; the chord between stations
        // 0 and 4 misses it
        let mut input = candidates(&[0.0; 5]);
        input[2].route_point = GeoPoint::new(1.0, 1.0);
        input[2].station_point = GeoPoint::new(1.0, 1.0).with_name("S02");
        assert_eq!(find_strategic(&input, 0, 4), Some(2));
        assert_eq!(find_strategic(&input, 0, 1), None);
    }

    #[test]
    fn test_find_strategic_rejects_deviation_beyond_next_sample() {
        // S01 strays 1° from the S00-S02 chord but the next sample is only
        // 0.2° away
        let mut input = candidates(&[0.0, 1.0, 0.0]);
        input[1].route_point = GeoPoint::new(1.0, 1.0);
        input[1].station_point = GeoPoint::new(1.0, 1.0).with_name("S01");
        input[2].route_point = GeoPoint::new(1.0, 1.2);
        input[2].station_point = GeoPoint::new(0.0, 2.0).with_name("S02");
        assert_eq!(find_strategic(&input, 0, 2), None);

        input[2].route_point = GeoPoint::new(0.5, 3.0);
        assert_eq!(find_strategic(&input, 0, 2), Some(1));
    }

    // (sample latitude, station latitude, station longitude), sample i at
    // longitude i
    const WANDERING: [(f64, f64, f64); 7] = [
        (-0.5, -0.3, 0.2),
        (0.7, 0.8, 0.8),
        (-0.2, 0.4, 1.8),
        (-0.4, 0.1, 3.0),
        (-0.6, -0.8, 4.2),
        (-0.3, -0.4, 5.1),
        (0.6, 0.6, 5.7),
    ];

    fn wandering() -> Vec<MatchCandidate> {
        WANDERING
            .iter()
            .enumerate()
            .map(|(i, &(sample, latitude, longitude))| MatchCandidate {
                route_point: GeoPoint::new(sample, i as f64),
                station_point: GeoPoint::new(latitude, longitude).with_name(format!("S{i:02}")),
                distance: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_simplify_runs_until_fixed_point() {
        let input = wandering();
        assert_eq!(simplify_pass(&input), vec![0, 1, 2, 4, 5, 6]);
        let once: Vec<MatchCandidate> = simplify_pass(&input)
            .into_iter()
            .map(|k| input[k].clone())
            .collect();
        // the second pass drops S02, the third keeps everything
        assert_eq!(simplify_pass(&once), vec![0, 1, 3, 4, 5]);
        assert_eq!(
            names(&simplify(input)),
            vec!["S00", "S01", "S04", "S05", "S06"]
        );
    }

    #[test]
    fn test_simplify_pass_skips_already_kept_station() {
        // S04 is found strategic but reports the same station as S01; the scan
        // still resumes from it
        let mut input = wandering();
        input[4].station_point = GeoPoint::new(-0.8, 4.2).with_name("S01");
        assert_eq!(simplify_pass(&input), vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_reduce_to_budget_xtd() {
        let offsets: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let result = reduce_to_budget(candidates(&offsets), 21, ReductionAlgorithm::Xtd);
        assert_eq!(result.len(), 21);
        assert_eq!(result[0].station_point.name(), "S00");
        assert_eq!(result[20].station_point.name(), "S29");
    }

    #[test]
    fn test_reduce_to_budget_crs() {
        let offsets: Vec<f64> = (0..25).map(|i| (i as f64 * 0.7).sin()).collect();
        let result = reduce_to_budget(candidates(&offsets), 21, ReductionAlgorithm::Crs);
        assert_eq!(result.len(), 21);
        assert_eq!(result[0].station_point.name(), "S00");
        assert_eq!(result[20].station_point.name(), "S24");
    }

    #[test]
    fn test_reduce_removes_least_informative_first() {
        // samples follow the stations: S02 lies on the chord of its
        // neighbors, S01 and S03 bulge out
        let mut input = candidates(&[0.0, 0.8, 0.0, -0.8, 0.0]);
        for candidate in &mut input {
            candidate.route_point = candidate.station_point.clone();
        }
        let result = reduce_to_budget(input, 4, ReductionAlgorithm::Xtd);
        assert_eq!(names(&result), vec!["S00", "S01", "S03", "S04"]);
    }

    #[test]
    fn test_lowest_score_ties_pick_first() {
        assert_eq!(lowest_score(5, |_| 1.0), Some(1));
        assert_eq!(lowest_score(2, |_| 1.0), None);
        assert_eq!(lowest_score(5, |i| if i == 3 { 0.0 } else { 1.0 }), Some(3));
    }
}

use crate::matcher::error::MatchError;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of stations the gramet service accepts in one request.
pub const STATION_BUDGET: usize = 21;

/// Route resampling step before station lookup, in km.
pub const DEFAULT_SAMPLE_KM: f64 = 60.0;

/// Segment length of the returned display route, in nautical miles.
pub const DEFAULT_SEGMENT_NM: f64 = 300.0;

/// Rule used to drop one station at a time while over [`STATION_BUDGET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionAlgorithm {
    /// Drop the station whose route sample is closest to the chord between
    /// its kept neighbors.
    #[default]
    Xtd,
    /// Drop the station that changes the course between its neighbors least.
    Crs,
}

impl FromStr for ReductionAlgorithm {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xtd" => Ok(ReductionAlgorithm::Xtd),
            "crs" => Ok(ReductionAlgorithm::Crs),
            _ => Err(MatchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ReductionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionAlgorithm::Xtd => write!(f, "xtd"),
            ReductionAlgorithm::Crs => write!(f, "crs"),
        }
    }
}

/// Settings of a route-to-station match.
///
/// # Examples
///
/// ```
/// use gramet_route::{MatchOptions, ReductionAlgorithm};
///
/// let options = MatchOptions::builder()
///     .name("AF010 LFPG-KJFK")
///     .algorithm(ReductionAlgorithm::Crs)
///     .excluded(vec!["LIMT".to_string()])
///     .build();
/// assert_eq!(options.sample_km, 60.0);
/// assert_eq!(options.segment_nm, 300.0);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct MatchOptions {
    /// Name given to the returned route.
    #[builder(default, into)]
    pub name: String,
    /// Description given to the returned route.
    #[builder(default, into)]
    pub description: String,
    #[builder(default = DEFAULT_SAMPLE_KM)]
    pub sample_km: f64,
    #[builder(default = DEFAULT_SEGMENT_NM)]
    pub segment_nm: f64,
    #[builder(default)]
    pub algorithm: ReductionAlgorithm,
    /// Station labels never to match.
    #[builder(default)]
    pub excluded: Vec<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions::builder().build()
    }
}

mod error;
mod geo;
mod gramet;
mod matcher;
mod request;
mod route;
mod stations;

pub use error::GrametError;
pub use gramet::Gramet;
pub use request::GrametRequest;

pub use geo::coordinates::{
    dm_to_decimal, format_dm, format_rounded_dm, parse_arinc_label, parse_degrees_minutes,
    parse_degrees_minutes_pair,
};
pub use geo::geo_point::GeoPoint;
pub use geo::units::*;

pub use route::flight_route::Route;
pub use route::split::SplitOptions;

pub use stations::dataset::{StationDataset, StationEntry};
pub use stations::geohash;
pub use stations::grid::{StationGrid, DEFAULT_PRECISION, GEOHASH_GRID_SIZE_KM};

pub use matcher::options::{
    MatchOptions, ReductionAlgorithm, DEFAULT_SAMPLE_KM, DEFAULT_SEGMENT_NM, STATION_BUDGET,
};
pub use matcher::{match_route, match_stations};

pub use geo::error::CoordinateParseError;
pub use matcher::error::MatchError;
pub use stations::error::StationIndexError;

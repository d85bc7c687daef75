pub mod coordinates;
pub mod error;
pub mod geo_point;
pub mod units;

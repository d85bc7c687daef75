pub mod dataset;
pub mod error;
pub mod geohash;
pub mod grid;

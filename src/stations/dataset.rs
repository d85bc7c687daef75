//! The static station list: `(label, latitude, longitude)` triples bucketed by
//! geohash, as produced by the offline dataset build.
//!
//! On disk this is a JSON object keyed by geohash:
//!
//! ```json
//! {"u09": [["LFPG", 49.0097, 2.5479], ["07150", 48.7167, 2.3833]]}
//! ```

use crate::geo::geo_point::GeoPoint;
use crate::stations::error::StationIndexError;
use crate::stations::geohash;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One station: label (ICAO code or WMO index), latitude, longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEntry(pub String, pub f64, pub f64);

impl StationEntry {
    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn to_point(&self) -> GeoPoint {
        GeoPoint::new(self.1, self.2).with_name(self.0.as_str())
    }
}

/// Geohash-keyed station buckets. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationDataset {
    cells: HashMap<String, Vec<StationEntry>>,
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

impl StationDataset {
    pub fn from_json_str(json: &str) -> Result<Self, StationIndexError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, StationIndexError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, StationIndexError> {
        let file = std::fs::File::open(path)
            .map_err(|e| StationIndexError::DatasetRead(path.to_path_buf(), e))?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!(
            "Loaded {} stations in {} cells from {}",
            dataset.station_count(),
            dataset.cell_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Buckets `(label, latitude, longitude)` triples by their geohash at
    /// `precision`, rounding coordinates to 6 decimals. Input order is kept
    /// within each cell.
    pub fn from_stations<I, S>(stations: I, precision: u8) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut cells: HashMap<String, Vec<StationEntry>> = HashMap::new();
        for (label, latitude, longitude) in stations {
            let hash = geohash::encode(latitude, longitude, usize::from(precision));
            cells.entry(hash).or_default().push(StationEntry(
                label.into(),
                round6(latitude),
                round6(longitude),
            ));
        }
        StationDataset { cells }
    }

    /// Stations of one cell; empty for an unknown cell.
    pub fn cell(&self, hash: &str) -> &[StationEntry] {
        self.cells.get(hash).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn station_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Geohash keys whose length differs from `precision`.
    pub(crate) fn mismatched_cell(&self, precision: u8) -> Option<&str> {
        self.cells
            .keys()
            .map(String::as_str)
            .find(|hash| hash.len() != usize::from(precision))
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationIndexError {
    #[error(
        "Radius of {radius_km:.1} km is too large for a grid of {grid_km} km cells, \
         rebuild the grid with precision={suggested_precision}"
    )]
    RadiusTooLarge {
        radius_km: f64,
        grid_km: f64,
        suggested_precision: u8,
    },

    #[error("Unsupported geohash precision {0}, expected 1 to 8")]
    InvalidPrecision(u8),

    #[error("Dataset cell '{hash}' does not match grid precision {precision}")]
    PrecisionMismatch { hash: String, precision: u8 },

    #[error("Failed to read station dataset '{0}'")]
    DatasetRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse station dataset")]
    DatasetParse(#[from] serde_json::Error),
}

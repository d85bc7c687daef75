use crate::stations::error::StationIndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    StationIndex(#[from] StationIndexError),

    #[error("Unknown reduction algorithm '{0}', expected 'xtd' or 'crs'")]
    UnknownAlgorithm(String),
}

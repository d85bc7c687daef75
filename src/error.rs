use crate::geo::error::CoordinateParseError;
use crate::matcher::error::MatchError;
use crate::stations::error::StationIndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrametError {
    #[error(transparent)]
    CoordinateParse(#[from] CoordinateParseError),

    #[error(transparent)]
    StationIndex(#[from] StationIndexError),

    #[error(transparent)]
    Match(MatchError),
}

impl From<MatchError> for GrametError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::StationIndex(inner) => GrametError::StationIndex(inner),
            other => GrametError::Match(other),
        }
    }
}

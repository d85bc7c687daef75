use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateParseError {
    #[error("Invalid hemisphere letter in coordinate '{token}'")]
    InvalidHemisphere { token: String },

    #[error("Invalid number in coordinate '{token}'")]
    InvalidNumber { token: String },

    #[error("Coordinate '{token}' is out of range")]
    OutOfRange { token: String },

    // Too short, non-ASCII or otherwise not matching any known layout
    #[error("Malformed coordinate '{token}'")]
    Malformed { token: String },
}

use std::fmt::{self, Display};

/// Enum representing the possible errors that can occur while building or
/// searching a point registry.
///
/// The possible errors are:
///
/// - `EmptyRegistry`: a search or bounds reduction was attempted over no points.
/// - `DuplicateId`: two points in the same registry share an id.
/// - `InvalidCoordinate`: a loaded point lies outside the valid latitude/longitude ranges.
/// - `ParseError`: a registry source could not be read or deserialized.
#[derive(Debug, PartialEq)]
pub enum LocatorError {
    EmptyRegistry,
    DuplicateId(String),
    InvalidCoordinate { lat: f64, long: f64 },
    ParseError(String),
}

impl Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::EmptyRegistry => {
                write!(f, "[EmptyRegistry]: The registry has no points to search")
            }
            LocatorError::DuplicateId(id) => {
                write!(f, "[DuplicateId]: The id '{}' appears more than once", id)
            }
            LocatorError::InvalidCoordinate { lat, long } => write!(
                f,
                "[InvalidCoordinate]: ({}, {}) is outside the valid latitude/longitude range",
                lat, long
            ),
            LocatorError::ParseError(msg) => write!(f, "[ParseError]: {}", msg),
        }
    }
}

impl std::error::Error for LocatorError {}

impl From<csv::Error> for LocatorError {
    fn from(err: csv::Error) -> Self {
        LocatorError::ParseError(err.to_string())
    }
}

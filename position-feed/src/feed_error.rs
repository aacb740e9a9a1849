use std::fmt;

/// Represents the failures a position feed can report, either for a single
/// reading or for the subscription as a whole.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    InvalidTrack(String), // A recorded track could not be parsed
    SpawnFailed(String),  // The watcher thread could not be started
}

impl FeedError {
    /// The numeric code used by location providers for reading failures.
    pub fn code(&self) -> Option<u8> {
        match self {
            FeedError::PermissionDenied => Some(1),
            FeedError::PositionUnavailable => Some(2),
            FeedError::Timeout => Some(3),
            FeedError::InvalidTrack(_) | FeedError::SpawnFailed(_) => None,
        }
    }

    /// Creates a reading failure from its numeric code.
    pub fn from_code(code: u8) -> Result<FeedError, FeedError> {
        match code {
            1 => Ok(FeedError::PermissionDenied),
            2 => Ok(FeedError::PositionUnavailable),
            3 => Ok(FeedError::Timeout),
            other => Err(FeedError::InvalidTrack(format!(
                "Unknown position error code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::PermissionDenied => write!(f, "User denied Geolocation"),
            FeedError::PositionUnavailable => write!(f, "Position unavailable"),
            FeedError::Timeout => write!(f, "Timeout expired"),
            FeedError::InvalidTrack(msg) => write!(f, "Invalid track: {}", msg),
            FeedError::SpawnFailed(msg) => write!(f, "Failed to start position feed: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> Self {
        FeedError::InvalidTrack(err.to_string())
    }
}

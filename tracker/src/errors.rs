use std::fmt;

use locator::LocatorError;
use logger::LoggerError;
use position_feed::FeedError;

/// Represents errors that can occur while running the tracker.
#[derive(Debug)]
pub enum TrackerError {
    InvalidArguments(String),
    Locator(LocatorError),
    Feed(FeedError),
    Logger(LoggerError),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            TrackerError::Locator(e) => write!(f, "Station registry error: {}", e),
            TrackerError::Feed(e) => write!(f, "Position feed error: {}", e),
            TrackerError::Logger(e) => write!(f, "Logger error: {}", e),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::InvalidArguments(_) => None,
            TrackerError::Locator(e) => Some(e),
            TrackerError::Feed(e) => Some(e),
            TrackerError::Logger(e) => Some(e),
        }
    }
}

impl From<LocatorError> for TrackerError {
    fn from(err: LocatorError) -> Self {
        TrackerError::Locator(err)
    }
}

impl From<FeedError> for TrackerError {
    fn from(err: FeedError) -> Self {
        TrackerError::Feed(err)
    }
}

impl From<LoggerError> for TrackerError {
    fn from(err: LoggerError) -> Self {
        TrackerError::Logger(err)
    }
}

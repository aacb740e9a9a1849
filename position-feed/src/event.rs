use chrono::{DateTime, Utc};
use locator::Coordinate;

use crate::feed_error::FeedError;

/// A successful position reading.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub accuracy_m: f64,
    pub timestamp: DateTime<Utc>,
}

/// What a subscription delivers on each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    Fix(PositionFix),
    Error(FeedError),
}

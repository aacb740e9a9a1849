use std::fmt;

use locator::{ClosestMatch, Coordinate, MapPosition, Point, Registry};
use position_feed::{FeedError, PositionEvent};

use crate::errors::TrackerError;

const TRACKING: &str = "Tracking your live position.";
const WAITING: &str = "Waiting for location permissions or GPS lock...";

/// What changed after applying a position event.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<'r> {
    NewStation(&'r Point),
    SameStation,
    Error(FeedError),
}

/// Live view state: the last known position, the station closest to it, the
/// last feed error, and where both markers sit on the map.
pub struct Tracker<'r> {
    registry: &'r Registry,
    position: Option<Coordinate>,
    closest: Option<ClosestMatch<'r>>,
    error: Option<String>,
    position_marker: Option<MapPosition>,
    closest_marker: Option<MapPosition>,
}

impl<'r> Tracker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            position: None,
            closest: None,
            error: None,
            position_marker: None,
            closest_marker: None,
        }
    }

    /// Applies one event from the position feed.
    ///
    /// A fix replaces the position, recomputes the closest station and both
    /// markers, and clears any previous error. An error is recorded while the
    /// last known position and station are kept.
    pub fn apply(&mut self, event: &PositionEvent) -> Result<Update<'r>, TrackerError> {
        match event {
            PositionEvent::Fix(fix) => {
                let registry = self.registry;
                let closest = registry.find_closest_match(fix.coordinate)?;
                let changed = self
                    .closest
                    .map(|previous| previous.point.id != closest.point.id)
                    .unwrap_or(true);

                self.position = Some(fix.coordinate);
                self.position_marker = Some(registry.project(fix.coordinate));
                self.closest_marker = Some(registry.project(closest.point.coordinate()));
                self.closest = Some(closest);
                self.error = None;

                if changed {
                    Ok(Update::NewStation(closest.point))
                } else {
                    Ok(Update::SameStation)
                }
            }
            PositionEvent::Error(e) => {
                self.error = Some(e.to_string());
                Ok(Update::Error(e.clone()))
            }
        }
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn closest(&self) -> Option<ClosestMatch<'r>> {
        self.closest
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn position_marker(&self) -> Option<MapPosition> {
        self.position_marker
    }

    pub fn closest_marker(&self) -> Option<MapPosition> {
        self.closest_marker
    }

    pub fn status(&self) -> &'static str {
        if self.position.is_some() {
            TRACKING
        } else {
            WAITING
        }
    }

    /// The location details panel as plain text.
    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tracker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Status")?;
        writeln!(f, "{}", self.status())?;

        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }

        if let Some(position) = self.position {
            writeln!(
                f,
                "Current coordinates: {:.5}, {:.5}",
                position.lat, position.long
            )?;
            if !self.registry.bounds().contains(position) {
                writeln!(f, "You are outside the mapped area.")?;
            }
        }

        if let Some(closest) = self.closest {
            writeln!(
                f,
                "Closest station: {} ({}), {:.2} km away",
                closest.point.name, closest.point.id, closest.distance_km
            )?;
        }

        if let Some(marker) = self.position_marker {
            writeln!(f, "Your location: {:.1}% x {:.1}%", marker.x, marker.y)?;
        }
        if let Some(marker) = self.closest_marker {
            writeln!(f, "Closest MRT station: {:.1}% x {:.1}%", marker.x, marker.y)?;
        }

        Ok(())
    }
}

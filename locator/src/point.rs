use serde::Deserialize;

use crate::errors::LocatorError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Checks that the latitude is within [-90, 90] and the longitude within [-180, 180].
    ///
    /// The resolver and projector never call this; it is used when loading
    /// points from external sources.
    pub fn validate(self) -> Result<Self, LocatorError> {
        let lat_ok = (-90.0..=90.0).contains(&self.lat);
        let long_ok = (-180.0..=180.0).contains(&self.long);
        if lat_ok && long_ok {
            Ok(self)
        } else {
            Err(LocatorError::InvalidCoordinate {
                lat: self.lat,
                long: self.long,
            })
        }
    }
}

/// Represents a named location in the registry (a station), with its code,
/// display name, and geographical position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Point {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub long: f64,
}

impl Point {
    pub fn new(id: &str, name: &str, lat: f64, long: f64) -> Self {
        Point {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            long,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.long)
    }
}

use std::f64::consts::PI;

use crate::point::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinates, using the
/// haversine formula.
///
/// The intermediate value is clamped to [0, 1] so rounding on near-antipodal
/// or coincident points can never reach `asin` with an out-of-domain argument.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    2.0 * EARTH_RADIUS_KM * central_term(from, to).sqrt().asin()
}

// Squared half-chord between the two points, as a fraction of the diameter.
fn central_term(from: Coordinate, to: Coordinate) -> f64 {
    let from_lat_rad = from.lat * PI / 180.0;
    let to_lat_rad = to.lat * PI / 180.0;

    let delta_lat = to_lat_rad - from_lat_rad;
    let delta_lon = (to.long - from.long) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat_rad.cos() * to_lat_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    a.clamp(0.0, 1.0)
}

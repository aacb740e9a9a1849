use crate::{
    distance::haversine_km,
    errors::LocatorError,
    point::{Coordinate, Point},
};

/// The point nearest to a query, together with its great-circle distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestMatch<'a> {
    pub point: &'a Point,
    pub distance_km: f64,
}

/// Finds the point closest to `query` by great-circle distance.
///
/// Points are scanned in order and only a strictly smaller distance replaces
/// the current best, so ties go to the first point encountered.
///
/// # Errors
/// - `LocatorError::EmptyRegistry` - If `points` is empty.
pub fn find_closest_match(
    query: Coordinate,
    points: &[Point],
) -> Result<ClosestMatch<'_>, LocatorError> {
    let mut iter = points.iter();
    let first = iter.next().ok_or(LocatorError::EmptyRegistry)?;

    let mut closest = ClosestMatch {
        point: first,
        distance_km: haversine_km(query, first.coordinate()),
    };

    for point in iter {
        let distance_km = haversine_km(query, point.coordinate());
        if distance_km < closest.distance_km {
            closest = ClosestMatch { point, distance_km };
        }
    }

    Ok(closest)
}

/// Finds the point closest to `query`. See [`find_closest_match`].
pub fn find_closest(query: Coordinate, points: &[Point]) -> Result<&Point, LocatorError> {
    find_closest_match(query, points).map(|closest| closest.point)
}

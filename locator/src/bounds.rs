use crate::{
    errors::LocatorError,
    point::{Coordinate, Point},
};

/// Represents the geographical boundaries of the mapped area, defined by the
/// minimum and maximum latitude and longitude of the registry's points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRectangle {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl BoundingRectangle {
    /// Latitude span in degrees.
    pub fn lat_range(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn long_range(&self) -> f64 {
        self.max_long - self.min_long
    }

    /// A rectangle with zero latitude or longitude span (single point or collinear points).
    pub fn is_degenerate(&self) -> bool {
        self.lat_range() == 0.0 || self.long_range() == 0.0
    }

    /// Checks whether a given coordinate is within the bounds, edges included.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.long >= self.min_long
            && coord.long <= self.max_long
    }
}

/// Reduces a set of points to the min/max envelope of their coordinates.
///
/// # Errors
/// - `LocatorError::EmptyRegistry` - If `points` is empty.
pub fn compute_bounding_rectangle(points: &[Point]) -> Result<BoundingRectangle, LocatorError> {
    let (first, rest) = points.split_first().ok_or(LocatorError::EmptyRegistry)?;

    let initial = BoundingRectangle {
        min_lat: first.lat,
        max_lat: first.lat,
        min_long: first.long,
        max_long: first.long,
    };

    Ok(rest.iter().fold(initial, |bounds, point| BoundingRectangle {
        min_lat: bounds.min_lat.min(point.lat),
        max_lat: bounds.max_lat.max(point.lat),
        min_long: bounds.min_long.min(point.long),
        max_long: bounds.max_long.max(point.long),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new("A", "Alpha", 1.30, 103.80),
            Point::new("B", "Beta", 1.40, 103.90),
            Point::new("C", "Gamma", 1.35, 103.70),
        ]
    }

    #[test]
    fn test_bounds_reduction() {
        let bounds = compute_bounding_rectangle(&sample_points()).unwrap();
        assert_eq!(
            bounds,
            BoundingRectangle {
                min_lat: 1.30,
                max_lat: 1.40,
                min_long: 103.70,
                max_long: 103.90,
            }
        );
        assert!(!bounds.is_degenerate());
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let bounds = compute_bounding_rectangle(&[Point::new("A", "Alpha", 1.3, 103.8)]).unwrap();
        assert_eq!(bounds.lat_range(), 0.0);
        assert_eq!(bounds.long_range(), 0.0);
        assert!(bounds.is_degenerate());
    }

    #[test]
    fn test_empty_points() {
        assert_eq!(
            compute_bounding_rectangle(&[]),
            Err(LocatorError::EmptyRegistry)
        );
    }

    #[test]
    fn test_contains() {
        let bounds = compute_bounding_rectangle(&sample_points()).unwrap();
        assert!(bounds.contains(Coordinate::new(1.35, 103.80)));
        assert!(bounds.contains(Coordinate::new(1.30, 103.70)));
        assert!(!bounds.contains(Coordinate::new(1.45, 103.80)));
        assert!(!bounds.contains(Coordinate::new(1.35, 104.00)));
    }
}

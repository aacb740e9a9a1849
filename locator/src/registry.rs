use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::{
    bounds::{compute_bounding_rectangle, BoundingRectangle},
    errors::LocatorError,
    point::{Coordinate, Point},
    projector::{project, MapPosition},
    resolver::{find_closest, find_closest_match, ClosestMatch},
};

/// An ordered, non-empty, read-only set of points with unique ids.
///
/// The bounding rectangle is computed once on construction and handed out by
/// reference, so projections never repeat the reduction.
#[derive(Debug, Clone)]
pub struct Registry {
    points: Vec<Point>,
    bounds: BoundingRectangle,
}

impl Registry {
    /// Creates a registry from points in declaration order.
    ///
    /// # Errors
    /// - `LocatorError::EmptyRegistry` - If `points` is empty.
    /// - `LocatorError::DuplicateId` - If two points share the same id.
    pub fn new(points: Vec<Point>) -> Result<Self, LocatorError> {
        let mut seen = HashSet::new();
        for point in &points {
            if !seen.insert(point.id.as_str()) {
                return Err(LocatorError::DuplicateId(point.id.clone()));
            }
        }

        let bounds = compute_bounding_rectangle(&points)?;
        Ok(Registry { points, bounds })
    }

    /// Loads a registry from CSV with the header `id,name,lat,long`.
    ///
    /// Unlike [`Registry::new`], every row is range-checked: a latitude outside
    /// [-90, 90] or a longitude outside [-180, 180] fails with
    /// `LocatorError::InvalidCoordinate`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LocatorError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        for row in csv_reader.deserialize::<Point>() {
            let point = row?;
            point.coordinate().validate()?;
            points.push(point);
        }

        Self::new(points)
    }

    /// Loads a registry from a CSV file. See [`Registry::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LocatorError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            LocatorError::ParseError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_csv_reader(file)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|point| point.id == id)
    }

    pub fn bounds(&self) -> &BoundingRectangle {
        &self.bounds
    }

    /// The point nearest to `query`. A constructed registry is never empty, so
    /// this only returns `Ok`.
    pub fn find_closest(&self, query: Coordinate) -> Result<&Point, LocatorError> {
        find_closest(query, &self.points)
    }

    pub fn find_closest_match(&self, query: Coordinate) -> Result<ClosestMatch<'_>, LocatorError> {
        find_closest_match(query, &self.points)
    }

    /// Projects `coord` into the percentage space of this registry's bounds.
    pub fn project(&self, coord: Coordinate) -> MapPosition {
        project(coord, &self.bounds)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS_CSV: &str = "id,name,lat,long
NS1,Jurong East,1.3331,103.7422
NS24,Dhoby Ghaut,1.2990,103.8455
EW13,City Hall,1.2931,103.8520
";

    #[test]
    fn test_new_preserves_order_and_bounds() {
        let registry = Registry::new(vec![
            Point::new("A", "Alpha", 1.30, 103.80),
            Point::new("B", "Beta", 1.40, 103.90),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(
            *registry.bounds(),
            BoundingRectangle {
                min_lat: 1.30,
                max_lat: 1.40,
                min_long: 103.80,
                max_long: 103.90,
            }
        );
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        assert_eq!(
            Registry::new(Vec::new()).unwrap_err(),
            LocatorError::EmptyRegistry
        );
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let result = Registry::new(vec![
            Point::new("A", "Alpha", 1.30, 103.80),
            Point::new("A", "Again", 1.40, 103.90),
        ]);
        assert_eq!(result.unwrap_err(), LocatorError::DuplicateId("A".into()));
    }

    #[test]
    fn test_from_csv() {
        let registry = Registry::from_csv_reader(STATIONS_CSV.as_bytes()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("NS24").unwrap().name, "Dhoby Ghaut");
        assert!(registry.get("CC1").is_none());

        let closest = registry
            .find_closest(Coordinate::new(1.2935, 103.8515))
            .unwrap();
        assert_eq!(closest.id, "EW13");
    }

    #[test]
    fn test_from_csv_rejects_out_of_range() {
        let csv = "id,name,lat,long\nX,Nowhere,95.0,103.0\n";
        assert_eq!(
            Registry::from_csv_reader(csv.as_bytes()).unwrap_err(),
            LocatorError::InvalidCoordinate {
                lat: 95.0,
                long: 103.0
            }
        );
    }

    #[test]
    fn test_from_csv_rejects_malformed_rows() {
        let csv = "id,name,lat,long\nX,Nowhere,north,103.0\n";
        assert!(matches!(
            Registry::from_csv_reader(csv.as_bytes()),
            Err(LocatorError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_csv_header_only_is_empty() {
        assert_eq!(
            Registry::from_csv_reader("id,name,lat,long\n".as_bytes()).unwrap_err(),
            LocatorError::EmptyRegistry
        );
    }

    #[test]
    fn test_project_uses_memoized_bounds() {
        let registry = Registry::new(vec![
            Point::new("A", "Alpha", 1.30, 103.80),
            Point::new("B", "Beta", 1.40, 103.90),
        ])
        .unwrap();
        let a = registry.get("A").unwrap().coordinate();
        assert_eq!(registry.project(a), MapPosition { x: 0.0, y: 100.0 });
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Registry::from_csv_path("/nonexistent/stations.csv"),
            Err(LocatorError::ParseError(_))
        ));
    }
}

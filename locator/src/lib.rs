//! Nearest-station lookup and map projection over a fixed set of named points.
//!
//! Everything here is synchronous and side-effect free. A [`Registry`] owns the
//! points and their memoized [`BoundingRectangle`]; the free functions work on
//! any slice of points.

pub mod bounds;
pub mod distance;
pub mod errors;
pub mod point;
pub mod projector;
pub mod registry;
pub mod resolver;

pub use bounds::{compute_bounding_rectangle, BoundingRectangle};
pub use distance::haversine_km;
pub use errors::LocatorError;
pub use point::{Coordinate, Point};
pub use projector::{project, MapPosition};
pub use registry::Registry;
pub use resolver::{find_closest, find_closest_match, ClosestMatch};

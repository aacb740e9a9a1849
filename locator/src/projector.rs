use crate::{bounds::BoundingRectangle, point::Coordinate};

/// A position over the map image, as percentages of its width (`x`) and
/// height (`y`). Both axes range from 0 to 100; `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    pub const CENTER: MapPosition = MapPosition { x: 50.0, y: 50.0 };
}

/// Maps a coordinate linearly into the percentage space of `bounds`.
///
/// Coordinates outside the bounds are pinned to the nearest edge. A rectangle
/// with no latitude or longitude span projects everything to the center.
pub fn project(coord: Coordinate, bounds: &BoundingRectangle) -> MapPosition {
    if bounds.is_degenerate() {
        return MapPosition::CENTER;
    }

    let x_percent = (coord.long - bounds.min_long) / bounds.long_range() * 100.0;
    let y_percent = (bounds.max_lat - coord.lat) / bounds.lat_range() * 100.0;

    MapPosition {
        x: x_percent.clamp(0.0, 100.0),
        y: y_percent.clamp(0.0, 100.0),
    }
}

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use locator::Coordinate;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

use crate::feed_error::FeedError;

/// Something that can be asked for the device's current position.
///
/// Returning `None` means the source is exhausted and the feed should end.
pub trait PositionSource {
    fn next_position(&mut self) -> Option<Result<Coordinate, FeedError>>;
}

/// Replays a recorded sequence of readings, failures included, in order.
pub struct TrackReplay {
    readings: VecDeque<Result<Coordinate, FeedError>>,
}

#[derive(Debug, Deserialize)]
struct TrackRow {
    lat: Option<f64>,
    long: Option<f64>,
    #[serde(default)]
    error: Option<u8>,
}

impl TrackReplay {
    pub fn new(readings: Vec<Result<Coordinate, FeedError>>) -> Self {
        Self {
            readings: readings.into(),
        }
    }

    /// A track with only successful readings.
    pub fn from_coordinates(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates.into_iter().map(Ok).collect())
    }

    /// Parses a track from CSV with the header `lat,long[,error]`.
    ///
    /// A row with an `error` code (1 = denied, 2 = unavailable, 3 = timeout)
    /// replays as a failed reading; its coordinates may be left empty.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, FeedError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut readings = Vec::new();
        for (index, row) in csv_reader.deserialize::<TrackRow>().enumerate() {
            let row = row?;
            let reading = match (row.error, row.lat, row.long) {
                (Some(code), _, _) => Err(FeedError::from_code(code)?),
                (None, Some(lat), Some(long)) => Ok(Coordinate::new(lat, long)),
                _ => {
                    return Err(FeedError::InvalidTrack(format!(
                        "Row {} has neither a position nor an error code",
                        index + 1
                    )))
                }
            };
            readings.push(reading);
        }

        Ok(Self::new(readings))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            FeedError::InvalidTrack(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_csv_reader(file)
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl PositionSource for TrackReplay {
    fn next_position(&mut self) -> Option<Result<Coordinate, FeedError>> {
        self.readings.pop_front()
    }
}

/// A simulated device that drifts randomly from a starting position.
pub struct RandomWalk {
    current: Coordinate,
    max_step_deg: f64,
    steps_left: Option<usize>,
    rng: StdRng,
}

impl RandomWalk {
    /// Roughly 100 m per step at the equator.
    pub const DEFAULT_STEP_DEG: f64 = 0.001;

    /// Creates a walk starting at `start`. With `steps` set, the walk ends
    /// after that many readings; otherwise it never ends. A step that is not
    /// finite is treated as zero.
    pub fn new(start: Coordinate, max_step_deg: f64, steps: Option<usize>) -> Self {
        Self::with_rng(start, max_step_deg, steps, StdRng::from_entropy())
    }

    /// Same as [`RandomWalk::new`] but reproducible.
    pub fn with_seed(start: Coordinate, max_step_deg: f64, steps: Option<usize>, seed: u64) -> Self {
        Self::with_rng(start, max_step_deg, steps, StdRng::seed_from_u64(seed))
    }

    fn with_rng(start: Coordinate, max_step_deg: f64, steps: Option<usize>, rng: StdRng) -> Self {
        Self {
            current: start,
            max_step_deg: if max_step_deg.is_finite() {
                max_step_deg.abs()
            } else {
                0.0
            },
            steps_left: steps,
            rng,
        }
    }
}

impl PositionSource for RandomWalk {
    fn next_position(&mut self) -> Option<Result<Coordinate, FeedError>> {
        if let Some(left) = self.steps_left.as_mut() {
            if *left == 0 {
                return None;
            }
            *left -= 1;
        }

        let reading = self.current;

        if self.max_step_deg > 0.0 {
            let step = self.max_step_deg;
            let lat = self.current.lat + self.rng.gen_range(-step..=step);
            let long = self.current.long + self.rng.gen_range(-step..=step);
            self.current = Coordinate::new(lat.clamp(-90.0, 90.0), wrap_longitude(long));
        }

        Some(Ok(reading))
    }
}

fn wrap_longitude(long: f64) -> f64 {
    if long > 180.0 {
        long - 360.0
    } else if long < -180.0 {
        long + 360.0
    } else {
        long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_in_order() {
        let mut track = TrackReplay::new(vec![
            Ok(Coordinate::new(1.30, 103.80)),
            Err(FeedError::Timeout),
            Ok(Coordinate::new(1.31, 103.81)),
        ]);
        assert_eq!(track.remaining(), 3);
        assert_eq!(
            track.next_position(),
            Some(Ok(Coordinate::new(1.30, 103.80)))
        );
        assert_eq!(track.next_position(), Some(Err(FeedError::Timeout)));
        assert_eq!(
            track.next_position(),
            Some(Ok(Coordinate::new(1.31, 103.81)))
        );
        assert_eq!(track.next_position(), None);
    }

    #[test]
    fn test_track_from_csv() {
        let csv = "lat,long,error
1.3000,103.8000,
,,1
1.3100,103.8100,
";
        let mut track = TrackReplay::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(track.remaining(), 3);
        assert_eq!(
            track.next_position(),
            Some(Ok(Coordinate::new(1.30, 103.80)))
        );
        assert_eq!(
            track.next_position(),
            Some(Err(FeedError::PermissionDenied))
        );
    }

    #[test]
    fn test_track_from_csv_without_error_column() {
        let csv = "lat,long\n1.3,103.8\n1.4,103.9\n";
        let track = TrackReplay::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(track.remaining(), 2);
    }

    #[test]
    fn test_track_row_without_position_or_error() {
        let csv = "lat,long,error\n1.3,,\n";
        assert!(matches!(
            TrackReplay::from_csv_reader(csv.as_bytes()),
            Err(FeedError::InvalidTrack(_))
        ));
    }

    #[test]
    fn test_random_walk_stays_near_start() {
        let start = Coordinate::new(1.35, 103.85);
        let mut walk = RandomWalk::with_seed(start, 0.001, Some(50), 7);

        assert_eq!(walk.next_position(), Some(Ok(start)));

        let mut count = 1;
        while let Some(Ok(coord)) = walk.next_position() {
            assert!((coord.lat - start.lat).abs() <= 0.05 + 1e-9);
            assert!((coord.long - start.long).abs() <= 0.05 + 1e-9);
            count += 1;
        }
        assert_eq!(count, 50);
    }

    #[test]
    fn test_random_walk_is_reproducible_with_seed() {
        let start = Coordinate::new(1.35, 103.85);
        let mut a = RandomWalk::with_seed(start, 0.01, Some(10), 42);
        let mut b = RandomWalk::with_seed(start, 0.01, Some(10), 42);
        for _ in 0..10 {
            assert_eq!(a.next_position(), b.next_position());
        }
    }

    #[test]
    fn test_random_walk_with_unbounded_step_stands_still() {
        let start = Coordinate::new(1.35, 103.85);
        for step in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut walk = RandomWalk::with_seed(start, step, Some(3), 1);
            for _ in 0..3 {
                assert_eq!(walk.next_position(), Some(Ok(start)));
            }
            assert!(walk.next_position().is_none());
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(12.5), 12.5);
    }
}

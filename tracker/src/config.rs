use std::path::PathBuf;
use std::time::Duration;

use locator::Coordinate;

use crate::errors::TrackerError;

pub const USAGE: &str = "Usage: tracker [--stations <csv>] [--track <csv> | --walk <lat>,<long>[,<steps>]] [--log-dir <dir>] [--interval-ms <n>]";

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_INTERVAL_MILLIS: u64 = 1000;

// Woodlands, near the northern edge of the network.
const DEFAULT_START: Coordinate = Coordinate {
    lat: 1.432893,
    long: 103.787384,
};

/// Where positions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Track(PathBuf),
    Walk {
        start: Coordinate,
        steps: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Stations CSV; the embedded MRT dataset is used when absent.
    pub stations: Option<PathBuf>,
    pub source: SourceConfig,
    pub log_dir: PathBuf,
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations: None,
            source: SourceConfig::Walk {
                start: DEFAULT_START,
                steps: None,
            },
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MILLIS),
        }
    }
}

impl Config {
    /// Parses command-line arguments, not including the program name.
    pub fn from_args<I>(args: I) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next().ok_or_else(|| {
                    TrackerError::InvalidArguments(format!("{} needs a value. {}", flag, USAGE))
                })
            };

            match flag.as_str() {
                "--stations" => config.stations = Some(PathBuf::from(value()?)),
                "--track" => config.source = SourceConfig::Track(PathBuf::from(value()?)),
                "--walk" => config.source = parse_walk(&value()?)?,
                "--log-dir" => config.log_dir = PathBuf::from(value()?),
                "--interval-ms" => {
                    let raw = value()?;
                    let millis = raw
                        .parse::<u64>()
                        .ok()
                        .filter(|millis| *millis > 0)
                        .ok_or_else(|| {
                            TrackerError::InvalidArguments(format!("Invalid interval: {}", raw))
                        })?;
                    config.interval = Duration::from_millis(millis);
                }
                other => {
                    return Err(TrackerError::InvalidArguments(format!(
                        "Unknown argument: {}. {}",
                        other, USAGE
                    )))
                }
            }
        }

        Ok(config)
    }
}

fn parse_walk(raw: &str) -> Result<SourceConfig, TrackerError> {
    let invalid = || TrackerError::InvalidArguments(format!("Invalid walk: {}. {}", raw, USAGE));

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid());
    }

    let lat = parts[0].parse::<f64>().map_err(|_| invalid())?;
    let long = parts[1].parse::<f64>().map_err(|_| invalid())?;
    let start = Coordinate::new(lat, long)
        .validate()
        .map_err(|_| invalid())?;

    let steps = match parts.get(2) {
        Some(steps) => Some(steps.parse::<usize>().map_err(|_| invalid())?),
        None => None,
    };

    Ok(SourceConfig::Walk { start, steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_all_flags() {
        let config = Config::from_args(args(&[
            "--stations",
            "stations.csv",
            "--track",
            "walk.csv",
            "--log-dir",
            "/tmp/mrt",
            "--interval-ms",
            "250",
        ]))
        .unwrap();

        assert_eq!(config.stations, Some(PathBuf::from("stations.csv")));
        assert_eq!(config.source, SourceConfig::Track(PathBuf::from("walk.csv")));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/mrt"));
        assert_eq!(config.interval, Duration::from_millis(250));
    }

    #[test]
    fn test_walk() {
        let config = Config::from_args(args(&["--walk", "1.30, 103.85, 20"])).unwrap();
        assert_eq!(
            config.source,
            SourceConfig::Walk {
                start: Coordinate::new(1.30, 103.85),
                steps: Some(20),
            }
        );

        let config = Config::from_args(args(&["--walk", "1.30,103.85"])).unwrap();
        assert!(matches!(
            config.source,
            SourceConfig::Walk { steps: None, .. }
        ));
    }

    #[test]
    fn test_invalid_arguments() {
        for bad in [
            vec!["--bogus"],
            vec!["--stations"],
            vec!["--interval-ms", "soon"],
            vec!["--interval-ms", "0"],
            vec!["--walk", "1.30"],
            vec!["--walk", "100.0,103.85"],
            vec!["--walk", "1.30,103.85,-1"],
        ] {
            assert!(
                matches!(
                    Config::from_args(args(&bad)),
                    Err(TrackerError::InvalidArguments(_))
                ),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}

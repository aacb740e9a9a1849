//! Terminal front end: watches a position feed and reports the closest MRT
//! station and both map markers on every update.

pub mod config;
pub mod errors;
pub mod state;

use chrono::Utc;
use locator::Registry;
use logger::{Color, Logger};
use position_feed::{watch_position, FeedOptions, RandomWalk, Subscription, TrackReplay};

use config::{Config, SourceConfig};
use errors::TrackerError;
use state::{Tracker, Update};

/// Singapore MRT stations shipped with the binary.
pub const MRT_STATIONS_CSV: &str = include_str!("../data/mrt_stations.csv");

/// Loads the configured stations file, or the embedded dataset.
pub fn load_registry(config: &Config) -> Result<Registry, TrackerError> {
    let registry = match &config.stations {
        Some(path) => Registry::from_csv_path(path)?,
        None => Registry::from_csv_reader(MRT_STATIONS_CSV.as_bytes())?,
    };
    Ok(registry)
}

/// Starts the position feed described by `config`.
pub fn start_feed(config: &Config) -> Result<Subscription, TrackerError> {
    let options = FeedOptions {
        interval: config.interval,
        ..FeedOptions::default()
    };

    let subscription = match &config.source {
        SourceConfig::Track(path) => watch_position(TrackReplay::from_csv_path(path)?, options)?,
        SourceConfig::Walk { start, steps } => watch_position(
            RandomWalk::new(*start, RandomWalk::DEFAULT_STEP_DEG, *steps),
            options,
        )?,
    };
    Ok(subscription)
}

/// Runs the tracker until the position feed ends.
pub fn run(config: Config) -> Result<(), TrackerError> {
    let session = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let logger = Logger::new(&config.log_dir, &session)?;

    let registry = load_registry(&config)?;
    logger.info(
        &format!("Loaded {} stations.", registry.len()),
        Color::Cyan,
        true,
    )?;

    let mut subscription = start_feed(&config)?;
    let mut tracker = Tracker::new(&registry);

    for event in subscription.events() {
        match tracker.apply(&event)? {
            Update::NewStation(station) => logger.info(
                &format!("Closest station: {} ({})", station.name, station.id),
                Color::Green,
                true,
            )?,
            Update::SameStation => {}
            Update::Error(e) => logger.warn(&e.to_string(), true)?,
        }
        println!("{}", tracker.details());
    }

    subscription.clear_watch();
    logger.info("Position feed ended.", Color::Blue, true)?;
    Ok(())
}

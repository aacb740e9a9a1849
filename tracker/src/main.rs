use std::env;

use tracker::{config::Config, errors::TrackerError, run};

/// Watches the device position and reports the closest MRT station.
///
/// # Usage
///
/// ```sh
/// cargo run --bin tracker -- [--stations <csv>] [--track <csv> | --walk <lat>,<long>[,<steps>]] [--log-dir <dir>] [--interval-ms <n>]
/// ```
///
/// # Example Execution
///
/// ```sh
/// cargo run --bin tracker -- --walk 1.2990,103.8455,30 --interval-ms 500
/// ```
fn main() -> Result<(), TrackerError> {
    let config = Config::from_args(env::args().skip(1))?;
    run(config)
}

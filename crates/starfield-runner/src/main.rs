//! Command-line runner for the Starfield color schedule.
//!
//! Resolves today's sunrise and sunset for the configured location, builds
//! the hourly schedule, and prints the current hour's substitution table as
//! a JSON line:
//!
//! ```text
//! {"hour":14,"phase":"day","luminance":0.37,"substitutions":{"#000000":"#000000",...}}
//! ```
//!
//! With `runner.follow` set, it keeps running and prints a new line at every
//! hour boundary until interrupted.

mod error;
mod runner;

use std::path::{Path, PathBuf};

use chrono::Local;
use starfield_core::SpaEphemeris;
use starfield_core::config::StarfieldConfig;
use starfield_palette::NamedPalette;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;
use crate::runner::HourlyRunner;

/// Config file used when `STARFIELD_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "starfield-config.yaml";

/// Application entry point.
///
/// Loads configuration, initializes logging, loads the palette, and emits
/// the current hour's report. In follow mode it then emits once per hour
/// until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the configuration or palette cannot be loaded, or if
/// output cannot be written.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("STARFIELD_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("starfield-runner starting");
    if found {
        info!(path = %config_path.display(), "configuration loaded");
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
    }
    info!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        palette = %config.palette.path.display(),
        squash_fill = config.palette.squash_fill,
        follow = config.runner.follow,
        "run configuration"
    );

    let palette = NamedPalette::load(&config.palette.path)?;

    let now = Local::now();
    let mut runner = HourlyRunner::new(
        SpaEphemeris::new(),
        config.location.geo(),
        palette,
        config.palette.squash_fill,
        &now,
    );
    runner.emit(&now, &mut std::io::stdout().lock())?;

    if config.runner.follow {
        info!("follow mode, emitting at each hour boundary");
        runner.follow(Local::now).await?;
    }

    info!("starfield-runner stopped");
    Ok(())
}

/// Load the run configuration, falling back to defaults (plus environment
/// overrides) when the file does not exist.
fn load_config(path: &Path) -> Result<(StarfieldConfig, bool), RunnerError> {
    if path.is_file() {
        Ok((StarfieldConfig::from_file(path)?, true))
    } else {
        Ok((StarfieldConfig::parse("")?, false))
    }
}

//! Error types for the runner.
//!
//! Every subsystem error converts into [`RunnerError`] so `main` can use `?`
//! throughout.

use starfield_core::config::ConfigError;
use starfield_palette::PaletteError;

/// Errors that can occur while running.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The run configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The palette could not be loaded or applied.
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// The schedule has no entry for the requested hour.
    #[error("no schedule entry for hour {hour}")]
    MissingHour {
        /// The local hour that was looked up.
        hour: u32,
    },

    /// Writing output or waiting for a signal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A report could not be serialized.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

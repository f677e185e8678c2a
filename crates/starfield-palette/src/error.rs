//! Error types for the `starfield-palette` crate.
//!
//! All fallible operations in this crate return [`PaletteError`]. A failed
//! load never yields a partial palette.

use std::path::PathBuf;

/// Errors that can occur while loading palettes or building substitution
/// tables.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// The file extension is not `yaml`, `yml` or `toml`.
    #[error("unsupported palette format: {}", path.display())]
    UnsupportedFormat {
        /// The rejected path.
        path: PathBuf,
    },

    /// The palette file does not exist.
    #[error("palette file not found: {}", path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The palette lacks a required key.
    #[error("palette is missing required key: {key}")]
    MissingColorKey {
        /// Dotted path of the missing key.
        key: String,
    },

    /// The palette file could not be parsed.
    #[error("failed to parse palette: {source}")]
    Parse {
        /// The underlying parser error.
        source: Box<config::ConfigError>,
    },

    /// A palette value is neither a hex code nor a known color name.
    #[error("invalid color for {key}: {value:?}")]
    InvalidColor {
        /// Palette key holding the value.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// A lookup named a color the palette does not define.
    #[error("color not in palette: {name}")]
    UnknownColor {
        /// The requested name.
        name: String,
    },
}

impl From<config::ConfigError> for PaletteError {
    fn from(source: config::ConfigError) -> Self {
        Self::Parse {
            source: Box::new(source),
        }
    }
}

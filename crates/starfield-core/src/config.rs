//! Configuration loading and typed config structures for the Starfield runner.
//!
//! The canonical configuration lives in `starfield-config.yaml` at the project
//! root. Every section has defaults, so an empty file (or no file at all) is a
//! valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use starfield_types::GeoLocation;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {variable}: {value:?}")]
    InvalidOverride {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level runner configuration.
///
/// Mirrors the structure of `starfield-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StarfieldConfig {
    /// Where on the globe the sky is computed for.
    #[serde(default)]
    pub location: LocationConfig,

    /// Palette file and transform options.
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Runner behaviour.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StarfieldConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `STARFIELD_LATITUDE` overrides `location.latitude`
    /// - `STARFIELD_LONGITUDE` overrides `location.longitude`
    /// - `STARFIELD_PALETTE` overrides `palette.path`
    /// - `STARFIELD_FOLLOW` overrides `runner.follow`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("STARFIELD_LATITUDE") {
            self.location.latitude = parse_override("STARFIELD_LATITUDE", value)?;
        }
        if let Some(value) = lookup("STARFIELD_LONGITUDE") {
            self.location.longitude = parse_override("STARFIELD_LONGITUDE", value)?;
        }
        if let Some(value) = lookup("STARFIELD_PALETTE") {
            self.palette.path = PathBuf::from(value);
        }
        if let Some(value) = lookup("STARFIELD_FOLLOW") {
            self.runner.follow = parse_override("STARFIELD_FOLLOW", value)?;
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(
    variable: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|_err| ConfigError::InvalidOverride { variable, value })
}

/// Observer location.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LocationConfig {
    /// Degrees north.
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Degrees east.
    #[serde(default)]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: 0.0,
        }
    }
}

impl LocationConfig {
    /// As a [`GeoLocation`].
    pub const fn geo(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

/// Palette configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaletteConfig {
    /// Path to a YAML or TOML palette file.
    #[serde(default = "default_palette_path")]
    pub path: PathBuf,

    /// Draw every fill in the foreground color.
    #[serde(default)]
    pub squash_fill: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            path: default_palette_path(),
            squash_fill: false,
        }
    }
}

/// Runner behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// Keep running and emit a table at every hour boundary.
    #[serde(default)]
    pub follow: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_latitude() -> f64 {
    51.48
}

fn default_palette_path() -> PathBuf {
    PathBuf::from("palettes/kanagawa.yml")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse_without_env(yaml: &str) -> StarfieldConfig {
        let mut config: StarfieldConfig = serde_yml::from_str(yaml).unwrap();
        config.apply_overrides(no_env).unwrap();
        config
    }

    #[test]
    fn default_config_is_valid() {
        let config = StarfieldConfig::default();
        assert_eq!(config.location.latitude, 51.48);
        assert_eq!(config.palette.path, PathBuf::from("palettes/kanagawa.yml"));
        assert!(!config.palette.squash_fill);
        assert!(!config.runner.follow);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
location:
  latitude: 69.65
  longitude: 18.96

palette:
  path: "palettes/gruvbox.toml"
  squash_fill: true

runner:
  follow: true

logging:
  level: "debug"
"#;
        let config = parse_without_env(yaml);
        assert_eq!(config.location.geo(), GeoLocation::new(69.65, 18.96));
        assert_eq!(config.palette.path, PathBuf::from("palettes/gruvbox.toml"));
        assert!(config.palette.squash_fill);
        assert!(config.runner.follow);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = parse_without_env("location:\n  longitude: -3.2\n");
        assert_eq!(config.location.longitude, -3.2);
        assert_eq!(config.location.latitude, 51.48);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: BTreeMap<&str, &str> = [
            ("STARFIELD_LATITUDE", "-33.9"),
            ("STARFIELD_LONGITUDE", "18.4"),
            ("STARFIELD_PALETTE", "palettes/other.yml"),
            ("STARFIELD_FOLLOW", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = StarfieldConfig::default();
        config
            .apply_overrides(|name| env.get(name).map(|v| (*v).to_owned()))
            .unwrap();

        assert_eq!(config.location.latitude, -33.9);
        assert_eq!(config.location.longitude, 18.4);
        assert_eq!(config.palette.path, PathBuf::from("palettes/other.yml"));
        assert!(config.runner.follow);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let mut config = StarfieldConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "STARFIELD_LATITUDE").then(|| "north".to_owned())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                variable: "STARFIELD_LATITUDE",
                ..
            })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("starfield-config.yaml");
        if path.exists() {
            let config = StarfieldConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}

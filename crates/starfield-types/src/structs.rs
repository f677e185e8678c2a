//! Core value structs for the Starfield color schedule.

use serde::{Deserialize, Serialize};

use crate::enums::{ColorName, Degeneracy, PhaseTag};

/// Number of hour slots in a schedule.
pub const HOURS_PER_DAY: u32 = 24;

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Degrees north of the equator (negative for south).
    pub latitude: f64,
    /// Degrees east of Greenwich (negative for west).
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a location from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Errors raised when constructing [`SolarTimes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolarTimesError {
    /// An hour was outside `0..=23`.
    #[error("{which} hour {hour} is outside 0..=23")]
    HourOutOfRange {
        /// Either `"sunrise"` or `"sunset"`.
        which: &'static str,
        /// The rejected value.
        hour: u32,
    },
}

/// Sunrise and sunset for one date, as local hours of day, or a polar
/// degeneracy when the sun does not cross the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTimes {
    /// The sun rises and sets.
    Normal {
        /// Local hour containing sunrise.
        sunrise_hour: u32,
        /// Local hour containing sunset.
        sunset_hour: u32,
    },
    /// The sun stays up or stays down all day.
    Degenerate(Degeneracy),
}

impl SolarTimes {
    /// Build the normal variant, rejecting hours outside `0..=23`.
    pub const fn normal(sunrise_hour: u32, sunset_hour: u32) -> Result<Self, SolarTimesError> {
        if sunrise_hour >= HOURS_PER_DAY {
            return Err(SolarTimesError::HourOutOfRange {
                which: "sunrise",
                hour: sunrise_hour,
            });
        }
        if sunset_hour >= HOURS_PER_DAY {
            return Err(SolarTimesError::HourOutOfRange {
                which: "sunset",
                hour: sunset_hour,
            });
        }
        Ok(Self::Normal {
            sunrise_hour,
            sunset_hour,
        })
    }

    /// Continuous day.
    pub const fn midnight_sun() -> Self {
        Self::Degenerate(Degeneracy::MidnightSun)
    }

    /// Continuous night.
    pub const fn polar_night() -> Self {
        Self::Degenerate(Degeneracy::PolarNight)
    }

    /// The degeneracy tag, if any.
    pub const fn degeneracy(&self) -> Option<Degeneracy> {
        match self {
            Self::Normal { .. } => None,
            Self::Degenerate(kind) => Some(*kind),
        }
    }

    /// Whether this is [`Degeneracy::PolarNight`].
    pub const fn is_polar_night(&self) -> bool {
        matches!(self, Self::Degenerate(Degeneracy::PolarNight))
    }
}

/// One hour of a built schedule.
///
/// `luminance` drives the background variant; `fill_luminance` and
/// `stroke_luminance` drive the other two. Entries are produced by the
/// schedule builder and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Local hour of day, `0..=23`.
    pub hour: u32,
    /// Phase tag for this hour.
    pub phase: PhaseTag,
    /// Background brightness (HSV value) in `[0, 1]`.
    pub luminance: f64,
    /// Palette key used for the background.
    pub background_color_name: ColorName,
    /// Palette key used for outlines (and squashed fills).
    pub foreground_color_name: ColorName,
    /// HSV value applied to the fill variant.
    pub fill_luminance: f64,
    /// HSV value applied to the stroke variant.
    pub stroke_luminance: f64,
}

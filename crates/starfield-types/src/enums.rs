//! Enumeration types for the Starfield color schedule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// Coarse period of the day assigned to each hour of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseTag {
    /// Sun below the horizon.
    Night,
    /// The hour in which the sun rises.
    Dawn,
    /// Sun above the horizon.
    Day,
    /// The hour in which the sun sets.
    Dusk,
}

impl PhaseTag {
    /// Whether this phase is one of the two transition hours.
    pub const fn is_transition(self) -> bool {
        matches!(self, Self::Dawn | Self::Dusk)
    }
}

impl fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Night => "night",
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Polar degeneracies
// ---------------------------------------------------------------------------

/// A date on which the sun either never sets or never rises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    /// Continuous day.
    MidnightSun,
    /// Continuous night.
    PolarNight,
}

// ---------------------------------------------------------------------------
// Semantic colors
// ---------------------------------------------------------------------------

/// The fixed vocabulary of semantic color names.
///
/// Every name doubles as a "magic" reference color: source vector art is
/// drawn using exactly these eight pure colors, which the compositor later
/// swaps for palette-derived colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    /// `#000000`
    Black,
    /// `#ff0000`
    Red,
    /// `#ffff00`
    Yellow,
    /// `#00ff00`
    Green,
    /// `#00ffff`
    Cyan,
    /// `#0000ff`
    Blue,
    /// `#ff00ff`
    Magenta,
    /// `#ffffff`
    White,
}

impl ColorName {
    /// All eight names, in reference-table order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Magenta,
        Self::White,
    ];

    /// The palette key for this color.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::White => "white",
        }
    }

    /// The reference hex used for this color in source vector art.
    pub const fn reference_hex(self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::Red => "#ff0000",
            Self::Yellow => "#ffff00",
            Self::Green => "#00ff00",
            Self::Cyan => "#00ffff",
            Self::Blue => "#0000ff",
            Self::Magenta => "#ff00ff",
            Self::White => "#ffffff",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the eight semantic color names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color name: {0}")]
pub struct UnknownColorName(pub String);

impl FromStr for ColorName {
    type Err = UnknownColorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == lowered)
            .ok_or_else(|| UnknownColorName(s.to_owned()))
    }
}

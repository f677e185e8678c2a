//! Shared type definitions for the Starfield color schedule.
//!
//! This crate is the single source of truth for the value types that flow
//! between the schedule engine, the palette transform, and the runner.
//!
//! # Modules
//!
//! - [`enums`] -- Phase tags, the semantic color vocabulary, polar degeneracies
//! - [`structs`] -- Geographic location, resolved solar times, schedule entries

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ColorName, Degeneracy, PhaseTag, UnknownColorName};
pub use structs::{GeoLocation, HOURS_PER_DAY, ScheduleEntry, SolarTimes, SolarTimesError};

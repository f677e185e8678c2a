//! Solar-driven color schedule for the Starfield renderer.
//!
//! This crate turns a location and a moment into a 24-hour schedule: each
//! hour gets a phase (night, dawn, day, dusk), a background brightness, and
//! the palette colors and levels the palette transform should apply.
//!
//! # Modules
//!
//! - [`solar`] -- [`Ephemeris`] trait, the SPA-backed [`SpaEphemeris`], and
//!   sunrise/sunset resolution with polar-degeneracy fallback.
//! - [`phase`] -- Per-hour phase tagging and day/night segment lengths.
//! - [`luminance`] -- The two-sided brightness ramp.
//! - [`schedule`] -- [`Schedule`] construction and the [`DailySchedule`] cache.
//! - [`config`] -- Configuration loading from `starfield-config.yaml`.
//!
//! [`Ephemeris`]: solar::Ephemeris
//! [`SpaEphemeris`]: solar::SpaEphemeris
//! [`Schedule`]: schedule::Schedule
//! [`DailySchedule`]: schedule::DailySchedule

pub mod config;
pub mod luminance;
pub mod phase;
pub mod schedule;
pub mod solar;

pub use schedule::{DailySchedule, Schedule};
pub use solar::{Ephemeris, EphemerisUnavailable, FixedEphemeris, SpaEphemeris, SunEvents};

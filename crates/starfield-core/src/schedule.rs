//! The 24-hour color schedule.
//!
//! A [`Schedule`] combines phase tags and the luminance curve into one
//! [`ScheduleEntry`] per hour, deciding for each hour which palette colors
//! and which fill/stroke levels the palette transform should use.
//!
//! # Design Principles
//!
//! - Every schedule is built in a single pass and is complete: 24 entries,
//!   hours `0..=23`. There is no partially built state.
//! - Schedules are values. A new date produces a new schedule that replaces
//!   the old one wholesale; entries are never edited in place.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use starfield_types::{ColorName, GeoLocation, HOURS_PER_DAY, PhaseTag, ScheduleEntry, SolarTimes};
use tracing::debug;

use crate::luminance::curve_for;
use crate::phase::{SegmentLengths, segment_lengths, tag_phases};
use crate::solar::{Ephemeris, resolve};

/// Entries darker than this get a light foreground.
pub const FOREGROUND_THRESHOLD: f64 = 0.25;

/// Stroke level for the light foreground.
const LIGHT_STROKE_LUM: f64 = 0.7;

/// Fill level for the light foreground.
const LIGHT_FILL_LUM: f64 = 0.6;

/// Stroke level for the dark foreground.
const DARK_STROKE_LUM: f64 = 0.0;

/// Fill level for the dark foreground.
const DARK_FILL_LUM: f64 = 1.0;

/// Background palette color for a phase.
pub const fn background_for(phase: PhaseTag) -> ColorName {
    match phase {
        PhaseTag::Night => ColorName::Black,
        PhaseTag::Dawn | PhaseTag::Dusk => ColorName::Magenta,
        PhaseTag::Day => ColorName::Blue,
    }
}

/// Build the entry for one hour from its phase and background luminance.
pub fn entry_for(hour: u32, phase: PhaseTag, luminance: f64) -> ScheduleEntry {
    let (foreground_color_name, stroke_luminance, fill_luminance) =
        if luminance < FOREGROUND_THRESHOLD {
            (ColorName::White, LIGHT_STROKE_LUM, LIGHT_FILL_LUM)
        } else {
            (ColorName::Black, DARK_STROKE_LUM, DARK_FILL_LUM)
        };

    ScheduleEntry {
        hour,
        phase,
        luminance,
        background_color_name: background_for(phase),
        foreground_color_name,
        fill_luminance,
        stroke_luminance,
    }
}

/// A complete day of schedule entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    times: SolarTimes,
    segments: SegmentLengths,
    entries: BTreeMap<u32, ScheduleEntry>,
}

impl Schedule {
    /// Build the schedule for already resolved solar times.
    pub fn build(times: SolarTimes) -> Self {
        let phases = tag_phases(times);
        let curve = curve_for(times);

        let entries: BTreeMap<u32, ScheduleEntry> = (0..HOURS_PER_DAY)
            .zip(phases.into_iter().zip(curve))
            .map(|(hour, (phase, luminance))| (hour, entry_for(hour, phase, luminance)))
            .collect();

        let segments = segment_lengths(times);
        debug!(
            ?times,
            daylight_hours = segments.daylight_hours,
            nighttime_hours = segments.nighttime_hours,
            "schedule built"
        );

        Self {
            times,
            segments,
            entries,
        }
    }

    /// Resolve solar times for `location` on `now`'s date and build the
    /// schedule.
    pub fn for_location<E, Tz>(ephemeris: &E, location: GeoLocation, now: &DateTime<Tz>) -> Self
    where
        E: Ephemeris + ?Sized,
        Tz: TimeZone,
    {
        Self::build(resolve(ephemeris, location, now))
    }

    /// The solar times this schedule was built from.
    pub const fn times(&self) -> SolarTimes {
        self.times
    }

    /// Hours strictly between dawn and dusk.
    pub const fn daylight_hours(&self) -> u32 {
        self.segments.daylight_hours
    }

    /// Hours of the night ramp.
    pub const fn nighttime_hours(&self) -> u32 {
        self.segments.nighttime_hours
    }

    /// The entry for `hour`, or `None` if `hour > 23`.
    pub fn get(&self, hour: u32) -> Option<&ScheduleEntry> {
        self.entries.get(&hour)
    }

    /// All entries in hour order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    /// Number of entries (always 24).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries. Built schedules always have 24.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the schedule for the current calendar date.
///
/// [`refresh`](Self::refresh) rebuilds the schedule when the local date
/// changes and leaves it untouched otherwise.
#[derive(Debug, Clone)]
pub struct DailySchedule<E> {
    ephemeris: E,
    location: GeoLocation,
    date: NaiveDate,
    schedule: Schedule,
}

impl<E: Ephemeris> DailySchedule<E> {
    /// Build the schedule for `now`'s date.
    pub fn new<Tz: TimeZone>(ephemeris: E, location: GeoLocation, now: &DateTime<Tz>) -> Self {
        let schedule = Schedule::for_location(&ephemeris, location, now);
        Self {
            ephemeris,
            location,
            date: now.date_naive(),
            schedule,
        }
    }

    /// Rebuild if `now` falls on a different date. Returns `true` when a new
    /// schedule was built.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        let date = now.date_naive();
        if date == self.date {
            return false;
        }
        self.schedule = Schedule::for_location(&self.ephemeris, self.location, now);
        self.date = date;
        debug!(%date, "daily schedule rebuilt");
        true
    }

    /// The current schedule.
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The date the current schedule was built for.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The entry for `now`'s hour.
    pub fn entry_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<&ScheduleEntry> {
        self.schedule.get(now.hour())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::luminance::{MAX_DAY_LUM, TRANSITION_LUM};
    use crate::solar::FixedEphemeris;

    #[test]
    fn foreground_flips_at_threshold() {
        let dark = entry_for(3, PhaseTag::Night, 0.1);
        assert_eq!(dark.foreground_color_name, ColorName::White);
        assert_eq!(dark.stroke_luminance, 0.7);
        assert_eq!(dark.fill_luminance, 0.6);

        let bright = entry_for(12, PhaseTag::Day, FOREGROUND_THRESHOLD);
        assert_eq!(bright.foreground_color_name, ColorName::Black);
        assert_eq!(bright.stroke_luminance, 0.0);
        assert_eq!(bright.fill_luminance, 1.0);
    }

    #[test]
    fn background_follows_phase() {
        assert_eq!(background_for(PhaseTag::Night), ColorName::Black);
        assert_eq!(background_for(PhaseTag::Dawn), ColorName::Magenta);
        assert_eq!(background_for(PhaseTag::Dusk), ColorName::Magenta);
        assert_eq!(background_for(PhaseTag::Day), ColorName::Blue);
    }

    #[test]
    fn build_is_complete() {
        let schedule = Schedule::build(SolarTimes::normal(6, 18).unwrap());
        assert_eq!(schedule.len(), 24);
        assert!(!schedule.is_empty());
        let hours: Vec<u32> = schedule.entries().map(|e| e.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u32>>());
        assert!(schedule.get(24).is_none());
    }

    #[test]
    fn noon_entry_on_equinox_like_day() {
        let schedule = Schedule::build(SolarTimes::normal(6, 18).unwrap());
        let noon = schedule.get(12).unwrap();
        assert_eq!(noon.phase, PhaseTag::Day);
        assert_eq!(noon.luminance, MAX_DAY_LUM);
        assert_eq!(noon.background_color_name, ColorName::Blue);
        assert_eq!(noon.foreground_color_name, ColorName::Black);

        let dawn = schedule.get(6).unwrap();
        assert_eq!(dawn.luminance, TRANSITION_LUM);
        assert_eq!(dawn.background_color_name, ColorName::Magenta);
        assert_eq!(dawn.foreground_color_name, ColorName::White);
    }

    #[test]
    fn daily_schedule_rebuilds_on_new_date_only() {
        let location = GeoLocation::new(51.5, 0.0);
        let first = Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap();
        let mut daily = DailySchedule::new(FixedEphemeris::new(6, 18), location, &first);
        assert_eq!(daily.entry_at(&first).unwrap().hour, 8);

        let later_same_day = Utc.with_ymd_and_hms(2024, 3, 20, 23, 0, 0).unwrap();
        assert!(!daily.refresh(&later_same_day));

        let next_day = Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).unwrap();
        assert!(daily.refresh(&next_day));
        assert_eq!(daily.date(), next_day.date_naive());
        assert_eq!(daily.schedule().len(), 24);
    }
}

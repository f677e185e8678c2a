//! Hourly report loop.
//!
//! [`HourlyRunner`] owns the day's schedule and the loaded palette. Each
//! report resolves the current local hour to a schedule entry and builds
//! its substitution table.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Timelike};
use serde::Serialize;
use starfield_core::{DailySchedule, Ephemeris};
use starfield_palette::{NamedPalette, SubstitutionTable};
use starfield_types::{GeoLocation, PhaseTag};
use tracing::{debug, info};

use crate::error::RunnerError;

/// One line of runner output.
#[derive(Debug, Clone, Serialize)]
pub struct HourReport {
    /// Local hour of day.
    pub hour: u32,
    /// Phase of that hour.
    pub phase: PhaseTag,
    /// Background brightness.
    pub luminance: f64,
    /// Reference hex to display hex.
    pub substitutions: SubstitutionTable,
}

/// Produces [`HourReport`]s, rebuilding the schedule when the date changes.
pub struct HourlyRunner<E> {
    daily: DailySchedule<E>,
    palette: NamedPalette,
    squash_fill: bool,
}

impl<E: Ephemeris> HourlyRunner<E> {
    /// Build the runner with the schedule for `now`'s date.
    pub fn new<Tz: TimeZone>(
        ephemeris: E,
        location: GeoLocation,
        palette: NamedPalette,
        squash_fill: bool,
        now: &DateTime<Tz>,
    ) -> Self {
        let daily = DailySchedule::new(ephemeris, location, now);
        info!(
            date = %daily.date(),
            daylight_hours = daily.schedule().daylight_hours(),
            nighttime_hours = daily.schedule().nighttime_hours(),
            "schedule built"
        );
        Self {
            daily,
            palette,
            squash_fill,
        }
    }

    /// The report for `now`'s hour.
    pub fn report<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<HourReport, RunnerError> {
        if self.daily.refresh(now) {
            info!(date = %self.daily.date(), "date changed, schedule rebuilt");
        }

        let hour = now.hour();
        let entry = self
            .daily
            .entry_at(now)
            .ok_or(RunnerError::MissingHour { hour })?;
        let substitutions = self.palette.transform_for(entry, self.squash_fill)?;

        Ok(HourReport {
            hour,
            phase: entry.phase,
            luminance: entry.luminance,
            substitutions,
        })
    }

    /// Write the report for `now` as one JSON line.
    pub fn emit<Tz: TimeZone, W: Write>(
        &mut self,
        now: &DateTime<Tz>,
        out: &mut W,
    ) -> Result<(), RunnerError> {
        let report = self.report(now)?;
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
        out.flush()?;
        debug!(hour = report.hour, phase = %report.phase, "report emitted");
        Ok(())
    }

    /// Emit a report at every hour boundary until Ctrl-C.
    pub async fn follow<Tz, F>(&mut self, clock: F) -> Result<(), RunnerError>
    where
        Tz: TimeZone,
        F: Fn() -> DateTime<Tz>,
    {
        loop {
            let wait = until_next_hour(&clock());
            debug!(wait_secs = wait.as_secs(), "sleeping until next hour");

            tokio::select! {
                () = tokio::time::sleep(wait) => {
                    self.emit(&clock(), &mut std::io::stdout().lock())?;
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    info!("interrupt received, stopping");
                    return Ok(());
                }
            }
        }
    }
}

/// Time left until the next top of the hour.
pub fn until_next_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let top_of_hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0));
    let next = top_of_hour.and_then(|t| t.checked_add_signed(TimeDelta::hours(1)));

    next.and_then(|next| next.signed_duration_since(now).to_std().ok())
        .unwrap_or(Duration::from_secs(60))
}

//! Sunrise and sunset resolution for a location and date.
//!
//! The astronomical work is delegated to an [`Ephemeris`]. The resolver only
//! converts the returned UTC instants into local hours and, when the
//! ephemeris cannot produce a sunrise or sunset (inside or near the polar
//! circles), classifies the date as midnight sun or polar night.
//!
//! # Polar classification
//!
//! | Latitude  | March..=August | September..=February |
//! |-----------|----------------|----------------------|
//! | `> 0`     | midnight sun   | polar night          |
//! | `<= 0`    | polar night    | midnight sun         |

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};
use starfield_types::{GeoLocation, SolarTimes};
use tracing::{debug, info};

/// The ephemeris could not produce a sunrise/sunset pair for the date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ephemeris unavailable: {reason}")]
pub struct EphemerisUnavailable {
    /// Why no sunrise/sunset was produced.
    pub reason: String,
}

impl EphemerisUnavailable {
    /// Create an unavailability signal with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Sunrise and sunset instants for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvents {
    /// Sunrise, UTC.
    pub sunrise: DateTime<Utc>,
    /// Sunset, UTC.
    pub sunset: DateTime<Utc>,
}

/// A source of sunrise/sunset instants.
///
/// Implementations return [`EphemerisUnavailable`] on dates where the sun
/// does not cross the horizon. The resolver treats that as a polar
/// degeneracy, not as an error.
pub trait Ephemeris {
    /// Compute sunrise and sunset for `location` on the UTC calendar day
    /// `date`.
    fn sunrise_sunset(
        &self,
        location: GeoLocation,
        date: NaiveDate,
    ) -> Result<SunEvents, EphemerisUnavailable>;
}

/// Ephemeris backed by the NREL Solar Position Algorithm.
///
/// Uses the standard sunrise/sunset horizon and a Delta T estimated from the
/// date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaEphemeris;

impl SpaEphemeris {
    /// Create a new SPA-backed ephemeris.
    pub const fn new() -> Self {
        Self
    }
}

impl Ephemeris for SpaEphemeris {
    fn sunrise_sunset(
        &self,
        location: GeoLocation,
        date: NaiveDate,
    ) -> Result<SunEvents, EphemerisUnavailable> {
        let delta_t = DeltaT::estimate_from_date(date.year(), date.month())
            .map_err(|e| EphemerisUnavailable::new(format!("delta T estimate failed: {e}")))?;

        let result = spa::sunrise_sunset_utc_for_horizon(
            date.year(),
            date.month(),
            date.day(),
            location.latitude,
            location.longitude,
            delta_t,
            Horizon::SunriseSunset,
        )
        .map_err(|e| EphemerisUnavailable::new(format!("sunrise/sunset calculation failed: {e}")))?;

        match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Ok(SunEvents {
                sunrise: utc_instant(date, sunrise.hours())?,
                sunset: utc_instant(date, sunset.hours())?,
            }),
            SunriseResult::AllDay { .. } => Err(EphemerisUnavailable::new("sun never sets")),
            SunriseResult::AllNight { .. } => Err(EphemerisUnavailable::new("sun never rises")),
        }
    }
}

/// Convert fractional hours past UTC midnight of `date` into an instant.
///
/// `hours` may fall outside `0..24` when the event lands on the previous or
/// next UTC day.
fn utc_instant(date: NaiveDate, hours: f64) -> Result<DateTime<Utc>, EphemerisUnavailable> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() {
        return Err(EphemerisUnavailable::new(format!("non-finite event time: {hours}")));
    }
    // |hours| is bounded by a couple of days, far inside i64.
    #[allow(clippy::cast_possible_truncation)]
    let millis = millis as i64;

    let offset = TimeDelta::try_milliseconds(millis)
        .ok_or_else(|| EphemerisUnavailable::new(format!("event offset out of range: {hours}")))?;

    date.and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(offset)
        .ok_or_else(|| EphemerisUnavailable::new(format!("event time out of range: {hours}")))
}

/// Whether `month` (1-12) falls in the summer half of the year at `latitude`.
///
/// The northern summer half is March through August. The equator is
/// treated as southern.
pub fn is_summer(latitude: f64, month: u32) -> bool {
    let northern_summer_month = (3..=8).contains(&month);
    northern_summer_month ^ (latitude <= 0.0)
}

/// Resolve sunrise and sunset hours for `location` on `now`'s local date.
///
/// The sunrise is the one falling on the local date and the sunset is the
/// first one at or after it, so a sunset past local midnight keeps its
/// small hour. When the ephemeris is unavailable for the date it is
/// classified with [`is_summer`]: summer gives
/// [`SolarTimes::midnight_sun`], otherwise [`SolarTimes::polar_night`].
/// This function never fails.
pub fn resolve<E, Tz>(ephemeris: &E, location: GeoLocation, now: &DateTime<Tz>) -> SolarTimes
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let date = now.date_naive();

    match local_events(ephemeris, location, date, &now.timezone()) {
        Ok(events) => {
            let sunrise_hour = events.sunrise.hour();
            let sunset_hour = events.sunset.hour();
            debug!(
                latitude = location.latitude,
                longitude = location.longitude,
                %date,
                sunrise_hour,
                sunset_hour,
                "solar times resolved"
            );
            SolarTimes::Normal {
                sunrise_hour,
                sunset_hour,
            }
        }
        Err(unavailable) => {
            let month = date.month();
            let times = if is_summer(location.latitude, month) {
                SolarTimes::midnight_sun()
            } else {
                SolarTimes::polar_night()
            };
            info!(
                latitude = location.latitude,
                month,
                reason = %unavailable.reason,
                degeneracy = ?times.degeneracy(),
                "no sunrise/sunset, falling back to polar classification"
            );
            times
        }
    }
}

/// Sunrise and sunset for the local `date`, in `tz`.
struct LocalEvents<Tz: TimeZone> {
    sunrise: DateTime<Tz>,
    sunset: DateTime<Tz>,
}

/// Pick the sunrise on the local `date` and the first sunset after it.
///
/// Ephemeris days are UTC days, so away from UTC the events of the local
/// date can come from the neighbouring UTC day. Events of the UTC days on
/// either side are searched; when no matching pair is found the events of
/// `date` itself are used as given.
fn local_events<E, Tz>(
    ephemeris: &E,
    location: GeoLocation,
    date: NaiveDate,
    tz: &Tz,
) -> Result<LocalEvents<Tz>, EphemerisUnavailable>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let central = ephemeris.sunrise_sunset(location, date)?;

    let mut candidates = vec![central];
    for neighbour in [date.pred_opt(), date.succ_opt()].into_iter().flatten() {
        if let Ok(events) = ephemeris.sunrise_sunset(location, neighbour) {
            candidates.push(events);
        }
    }

    let sunrise = candidates
        .iter()
        .map(|events| events.sunrise)
        .filter(|sunrise| sunrise.with_timezone(tz).date_naive() == date)
        .min();
    let sunset = sunrise.and_then(|sunrise| {
        candidates
            .iter()
            .map(|events| events.sunset)
            .filter(|&sunset| {
                sunset >= sunrise && sunset.signed_duration_since(sunrise) < TimeDelta::days(1)
            })
            .min()
    });

    let (sunrise, sunset) = match (sunrise, sunset) {
        (Some(sunrise), Some(sunset)) => (sunrise, sunset),
        _ => {
            debug!(%date, "no sunrise on the local date, using events as given");
            (central.sunrise, central.sunset)
        }
    };

    Ok(LocalEvents {
        sunrise: sunrise.with_timezone(tz),
        sunset: sunset.with_timezone(tz),
    })
}

/// An [`Ephemeris`] that returns fixed local hours, or is always unavailable.
///
/// Hours are interpreted as UTC, so resolving against a `Utc` clock yields
/// them back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEphemeris {
    hours: Option<(u32, u32)>,
}

impl FixedEphemeris {
    /// Sunrise and sunset at the top of the given UTC hours.
    pub const fn new(sunrise_hour: u32, sunset_hour: u32) -> Self {
        Self {
            hours: Some((sunrise_hour, sunset_hour)),
        }
    }

    /// Every date is a polar date.
    pub const fn unavailable() -> Self {
        Self { hours: None }
    }
}

impl Ephemeris for FixedEphemeris {
    fn sunrise_sunset(
        &self,
        _location: GeoLocation,
        date: NaiveDate,
    ) -> Result<SunEvents, EphemerisUnavailable> {
        let (sunrise_hour, sunset_hour) = self
            .hours
            .ok_or_else(|| EphemerisUnavailable::new("fixed ephemeris has no events"))?;
        Ok(SunEvents {
            sunrise: utc_instant(date, f64::from(sunrise_hour))?,
            sunset: utc_instant(date, f64::from(sunset_hour))?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn northern_summer_months() {
        for month in 3..=8 {
            assert!(is_summer(60.0, month), "month {month} should be summer at 60N");
            assert!(!is_summer(-60.0, month), "month {month} should be winter at 60S");
        }
        for month in [1, 2, 9, 10, 11, 12] {
            assert!(!is_summer(60.0, month), "month {month} should be winter at 60N");
            assert!(is_summer(-60.0, month), "month {month} should be summer at 60S");
        }
    }

    #[test]
    fn equator_counts_as_southern() {
        assert!(!is_summer(0.0, 6));
        assert!(is_summer(0.0, 12));
    }

    #[test]
    fn fixed_hours_resolve_unchanged_in_utc() {
        let ephemeris = FixedEphemeris::new(6, 18);
        let times = resolve(&ephemeris, GeoLocation::new(51.5, 0.0), &utc(2024, 3, 20, 9));
        assert_eq!(
            times,
            SolarTimes::Normal {
                sunrise_hour: 6,
                sunset_hour: 18
            }
        );
    }

    #[test]
    fn hours_follow_the_clock_offset() {
        let ephemeris = FixedEphemeris::new(6, 18);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = plus_two.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let times = resolve(&ephemeris, GeoLocation::new(48.0, 16.0), &now);
        assert_eq!(
            times,
            SolarTimes::Normal {
                sunrise_hour: 8,
                sunset_hour: 20
            }
        );
    }

    #[test]
    fn unavailable_in_june_is_midnight_sun_in_the_north() {
        let ephemeris = FixedEphemeris::unavailable();
        let times = resolve(&ephemeris, GeoLocation::new(85.0, 0.0), &utc(2024, 6, 21, 0));
        assert_eq!(times, SolarTimes::midnight_sun());
    }

    #[test]
    fn unavailable_in_june_is_polar_night_in_the_south() {
        let ephemeris = FixedEphemeris::unavailable();
        let times = resolve(&ephemeris, GeoLocation::new(-85.0, 0.0), &utc(2024, 6, 21, 0));
        assert_eq!(times, SolarTimes::polar_night());
    }

    #[test]
    fn utc_instant_handles_previous_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let instant = utc_instant(date, -1.5).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 9, 22, 30, 0).unwrap());
    }

    #[test]
    fn utc_instant_rejects_nan() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert!(utc_instant(date, f64::NAN).is_err());
    }

    #[test]
    fn spa_reports_polar_dates_as_unavailable() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let result = SpaEphemeris::new().sunrise_sunset(GeoLocation::new(85.0, 0.0), date);
        assert!(result.is_err());
    }

    #[test]
    fn spa_equinox_at_greenwich() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let events = SpaEphemeris::new()
            .sunrise_sunset(GeoLocation::new(51.48, 0.0), date)
            .unwrap();
        assert_eq!(events.sunrise.hour(), 6);
        assert_eq!(events.sunset.hour(), 18);
    }

    /// Events that move one hour later each UTC day, so the chosen UTC day
    /// shows in the resolved hours. Sunrise lands at `day - 1` o'clock UTC
    /// and sunset at `day - 13` o'clock UTC.
    struct DriftingEphemeris;

    impl Ephemeris for DriftingEphemeris {
        fn sunrise_sunset(
            &self,
            _location: GeoLocation,
            date: NaiveDate,
        ) -> Result<SunEvents, EphemerisUnavailable> {
            let day = f64::from(date.day());
            Ok(SunEvents {
                sunrise: utc_instant(date, day - 1.0)?,
                sunset: utc_instant(date, day - 13.0)?,
            })
        }
    }

    #[test]
    fn events_come_from_the_local_date_east_of_utc() {
        // Local 2024-06-21 in UTC+10: sunrise 06-20 19:00Z (05:00 local),
        // then sunset 06-21 08:00Z (18:00 local). The UTC day 06-21 alone
        // would give a sunrise on local 06-22 at 06:00.
        let plus_ten = FixedOffset::east_opt(10 * 3600).unwrap();
        let now = plus_ten.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let times = resolve(&DriftingEphemeris, GeoLocation::new(-30.0, 150.0), &now);
        assert_eq!(times, SolarTimes::normal(5, 18).unwrap());
    }

    #[test]
    fn events_come_from_the_local_date_west_of_utc() {
        // Local 2024-06-21 in UTC-10: sunrise 06-21 20:00Z (10:00 local),
        // then sunset 06-22 09:00Z (23:00 local).
        let minus_ten = FixedOffset::west_opt(10 * 3600).unwrap();
        let now = minus_ten.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let times = resolve(&DriftingEphemeris, GeoLocation::new(20.0, -150.0), &now);
        assert_eq!(times, SolarTimes::normal(10, 23).unwrap());
    }

    #[test]
    fn sunset_after_local_midnight_keeps_its_hour() {
        let ephemeris = FixedEphemeris::new(2, 0);
        let times = resolve(&ephemeris, GeoLocation::new(64.1, -21.9), &utc(2024, 6, 21, 12));
        assert_eq!(times, SolarTimes::normal(2, 0).unwrap());
    }
}

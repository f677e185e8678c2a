//! Hourly brightness curve.
//!
//! The curve is built from two symmetric ramps, one spanning the daylight
//! segment and one spanning the night segment, plus a fixed value for the
//! dawn and dusk hours.
//!
//! # Ramp construction
//!
//! A ramp of length `n` runs from an edge value toward a centre value and
//! back. The first `floor(n / 2)` values step linearly from the edge with
//! `step = 2 * (centre - edge) / n`. An even-length ramp is that half
//! followed by its reverse, so the centre value itself never appears. An
//! odd-length ramp places the centre value once between the half and its
//! reverse.
//!
//! | Segment | Edge            | Centre          | Starts at           |
//! |---------|-----------------|-----------------|---------------------|
//! | Day     | [`MIN_DAY_LUM`] | [`MAX_DAY_LUM`] | hour after sunrise  |
//! | Night   | [`MAX_NIGHT_LUM`] | [`MIN_NIGHT_LUM`] | hour after sunset |
//!
//! The night ramp wraps past midnight.

use starfield_types::{Degeneracy, HOURS_PER_DAY, SolarTimes};

use crate::phase::{SegmentLengths, segment_lengths};

/// Brightness at the edges of the daylight ramp.
pub const MIN_DAY_LUM: f64 = 0.15;

/// Brightness at the middle of the daylight ramp.
pub const MAX_DAY_LUM: f64 = 0.4;

/// Brightness at the edges of the night ramp.
pub const MAX_NIGHT_LUM: f64 = 0.1;

/// Brightness at the middle of the night ramp.
pub const MIN_NIGHT_LUM: f64 = 0.0;

/// Brightness of the dawn and dusk hours.
pub const TRANSITION_LUM: f64 = 0.15;

/// One brightness value per hour, indexed by hour of day.
pub type LuminanceCurve = [f64; 24];

/// The hour before the midnight-sun day ramp, so the ramp starts at 00:00
/// and peaks around noon.
const MIDNIGHT_SUN_ANCHOR: u32 = 23;

/// The hour before the polar-night ramp, so the ramp starts at 12:00 and its
/// trough straddles midnight.
const POLAR_NIGHT_ANCHOR: u32 = 11;

/// Build a symmetric ramp of `len` values between `edge` and `centre`.
///
/// With `mirror_only` set, the centre value is never inserted and an odd
/// length yields `len - 1` values.
pub fn ramp(len: u32, edge: f64, centre: f64, mirror_only: bool) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }

    let step = 2.0 * (centre - edge) / f64::from(len);
    let half: Vec<f64> = (0..len / 2).map(|i| f64::from(i).mul_add(step, edge)).collect();

    let mut values = Vec::with_capacity(len as usize);
    values.extend_from_slice(&half);
    if len % 2 == 1 && !mirror_only {
        values.push(centre);
    }
    values.extend(half.iter().rev());
    values
}

/// Build the 24-hour curve.
///
/// The day ramp is laid out from `sunrise_hour + 1` and the night ramp from
/// `sunset_hour + 1`, both modulo 24. When the segments do not cover the
/// whole day, the sunrise and sunset hours are transition hours and get
/// [`TRANSITION_LUM`]. With `polar_night` the night ramp never inserts a
/// distinct trough value. Hours left uncovered stay at 0.
pub fn build(
    daylight_hours: u32,
    nighttime_hours: u32,
    sunrise_hour: u32,
    sunset_hour: u32,
    polar_night: bool,
) -> LuminanceCurve {
    let mut curve = [0.0; 24];

    let day = ramp(daylight_hours, MIN_DAY_LUM, MAX_DAY_LUM, false);
    lay_out(&mut curve, next_hour(sunrise_hour), &day);

    let night = ramp(nighttime_hours, MAX_NIGHT_LUM, MIN_NIGHT_LUM, polar_night);
    lay_out(&mut curve, next_hour(sunset_hour), &night);

    let has_transitions = daylight_hours.saturating_add(nighttime_hours) < HOURS_PER_DAY;
    if has_transitions {
        for hour in [sunrise_hour, sunset_hour] {
            if let Some(slot) = curve.get_mut(hour as usize) {
                *slot = TRANSITION_LUM;
            }
        }
    }

    for value in &mut curve {
        *value = value.clamp(0.0, 1.0);
    }
    curve
}

/// Build the curve for resolved solar times.
pub fn curve_for(times: SolarTimes) -> LuminanceCurve {
    let SegmentLengths {
        daylight_hours,
        nighttime_hours,
    } = segment_lengths(times);

    let (sunrise_hour, sunset_hour) = match times {
        SolarTimes::Normal {
            sunrise_hour,
            sunset_hour,
        } => (sunrise_hour, sunset_hour),
        SolarTimes::Degenerate(Degeneracy::MidnightSun) => {
            (MIDNIGHT_SUN_ANCHOR, MIDNIGHT_SUN_ANCHOR)
        }
        SolarTimes::Degenerate(Degeneracy::PolarNight) => (POLAR_NIGHT_ANCHOR, POLAR_NIGHT_ANCHOR),
    };

    build(
        daylight_hours,
        nighttime_hours,
        sunrise_hour,
        sunset_hour,
        times.is_polar_night(),
    )
}

const fn next_hour(hour: u32) -> u32 {
    hour.saturating_add(1) % HOURS_PER_DAY
}

/// Write `values` into consecutive hours starting at `start`, wrapping.
fn lay_out(curve: &mut LuminanceCurve, start: u32, values: &[f64]) {
    let start = start as usize;
    for (offset, &value) in values.iter().enumerate() {
        let hour = start.saturating_add(offset) % curve.len();
        if let Some(slot) = curve.get_mut(hour) {
            *slot = value;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::float_cmp
)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn normal(sunrise: u32, sunset: u32) -> LuminanceCurve {
        curve_for(SolarTimes::normal(sunrise, sunset).unwrap())
    }

    #[test]
    fn empty_and_single_ramps() {
        assert!(ramp(0, MIN_DAY_LUM, MAX_DAY_LUM, false).is_empty());
        assert_eq!(ramp(1, MIN_DAY_LUM, MAX_DAY_LUM, false), vec![MAX_DAY_LUM]);
        assert_eq!(ramp(1, MAX_NIGHT_LUM, MIN_NIGHT_LUM, false), vec![MIN_NIGHT_LUM]);
    }

    #[test]
    fn odd_ramp_has_single_centre() {
        let values = ramp(5, MIN_DAY_LUM, MAX_DAY_LUM, false);
        assert_eq!(values.len(), 5);
        assert_eq!(values[2], MAX_DAY_LUM);
        assert_relative_eq!(values[0], 0.15);
        assert_relative_eq!(values[1], 0.25);
        assert_eq!(values[0], values[4]);
        assert_eq!(values[1], values[3]);
    }

    #[test]
    fn even_ramp_is_mirrored_without_centre() {
        let values = ramp(4, MIN_DAY_LUM, MAX_DAY_LUM, false);
        assert_eq!(values.len(), 4);
        assert_relative_eq!(values[0], 0.15);
        assert_relative_eq!(values[1], 0.275);
        assert_eq!(values[1], values[2]);
        assert!(!values.contains(&MAX_DAY_LUM));
    }

    #[test]
    fn mirror_only_drops_centre() {
        let values = ramp(5, MAX_NIGHT_LUM, MIN_NIGHT_LUM, true);
        assert_eq!(values.len(), 4);
        assert!(!values.contains(&MIN_NIGHT_LUM));
    }

    #[test]
    fn six_to_eighteen_curve() {
        let curve = normal(6, 18);

        assert_eq!(curve[6], TRANSITION_LUM);
        assert_eq!(curve[18], TRANSITION_LUM);
        assert_eq!(curve[12], MAX_DAY_LUM);
        assert_eq!(curve[7], MIN_DAY_LUM);
        assert_eq!(curve[17], MIN_DAY_LUM);
        assert_eq!(curve[0], MIN_NIGHT_LUM);
        assert_eq!(curve[19], MAX_NIGHT_LUM);
        assert_eq!(curve[5], MAX_NIGHT_LUM);

        for offset in 1..=5 {
            assert_eq!(curve[12 - offset], curve[12 + offset], "day asymmetry at {offset}");
        }
        for offset in 1..=5 {
            assert_eq!(curve[24 - offset], curve[offset], "night asymmetry at {offset}");
        }
    }

    #[test]
    fn even_day_has_twin_peak() {
        // sunrise 6, sunset 19: 12 daylight hours (7..=18), 10 night hours.
        let curve = normal(6, 19);
        assert_eq!(curve[12], curve[13]);
        assert!(curve[12] < MAX_DAY_LUM);
        for offset in 0..6 {
            assert_eq!(curve[7 + offset], curve[18 - offset]);
        }
        // Night 20..=5, even: no exact zero.
        assert!(curve.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn day_ramp_rises_until_noon() {
        let curve = normal(6, 18);
        for hour in 7..12 {
            assert!(curve[hour] < curve[hour + 1], "not rising at {hour}");
        }
        for hour in 12..17 {
            assert!(curve[hour] > curve[hour + 1], "not falling at {hour}");
        }
    }

    #[test]
    fn day_ramp_wraps_midnight() {
        // sunrise 2, sunset 0: day 3..=23 (21 hours), night is hour 1 alone.
        let curve = normal(2, 0);
        assert_eq!(curve[2], TRANSITION_LUM);
        assert_eq!(curve[0], TRANSITION_LUM);
        assert_eq!(curve[1], MIN_NIGHT_LUM);
        assert_eq!(curve[3], MIN_DAY_LUM);
        assert_eq!(curve[23], MIN_DAY_LUM);
        assert_eq!(curve[13], MAX_DAY_LUM);
        for offset in 1..=10 {
            assert_eq!(curve[13 - offset], curve[13 + offset], "day asymmetry at {offset}");
        }
    }

    #[test]
    fn night_ramp_wraps_midnight() {
        // sunrise 8, sunset 16: night 17..=7, 15 hours, trough at 0.
        let curve = normal(8, 16);
        assert_eq!(curve[0], MIN_NIGHT_LUM);
        assert_eq!(curve[17], MAX_NIGHT_LUM);
        assert_eq!(curve[7], MAX_NIGHT_LUM);
        assert_eq!(curve[23], curve[1]);
        assert_eq!(curve.iter().filter(|&&v| v == MIN_NIGHT_LUM).count(), 1);
    }

    #[test]
    fn every_normal_curve_is_in_range() {
        for sunrise in 0..24 {
            for sunset in (0..24).filter(|&sunset| sunset != sunrise) {
                let curve = normal(sunrise, sunset);
                assert!(curve.iter().all(|v| (0.0..=1.0).contains(v)));
                assert_eq!(curve[sunrise as usize], TRANSITION_LUM);
                assert_eq!(curve[sunset as usize], TRANSITION_LUM);
            }
        }
    }

    #[test]
    fn midnight_sun_peaks_at_noon() {
        let curve = curve_for(SolarTimes::midnight_sun());
        assert_eq!(curve[0], MIN_DAY_LUM);
        assert_eq!(curve[23], MIN_DAY_LUM);
        assert_eq!(curve[11], curve[12]);
        let peak = curve.iter().copied().fold(0.0, f64::max);
        assert_eq!(peak, curve[11]);
        assert!(curve.iter().all(|&v| v >= MIN_DAY_LUM && v < MAX_DAY_LUM));
    }

    #[test]
    fn polar_night_trough_on_wrap_boundary() {
        let curve = curve_for(SolarTimes::polar_night());
        assert_eq!(curve[12], MAX_NIGHT_LUM);
        assert_eq!(curve[11], MAX_NIGHT_LUM);
        assert_eq!(curve[23], curve[0]);
        let trough = curve.iter().copied().fold(1.0, f64::min);
        assert_eq!(trough, curve[0]);
        assert!(curve.iter().all(|&v| v > 0.0 && v <= MAX_NIGHT_LUM));
    }

    #[test]
    fn shared_hour_curve_is_fully_covered() {
        let curve = normal(11, 11);
        assert_eq!(curve[11], TRANSITION_LUM);
        // 23 night hours from 12 through 10, odd: single trough.
        assert_eq!(curve[12], MAX_NIGHT_LUM);
        assert_eq!(curve[10], MAX_NIGHT_LUM);
        assert_eq!(curve.iter().filter(|&&v| v == MIN_NIGHT_LUM).count(), 1);
        assert_eq!(curve[23], MIN_NIGHT_LUM);
    }
}

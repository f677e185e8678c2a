//! Per-hour phase tagging from resolved solar times.
//!
//! Normal dates are tagged by how many hours an hour lies after sunrise,
//! counting forward and wrapping past midnight. With `d` the number of
//! hours from sunrise to sunset:
//!
//! | Hours after sunrise | Phase |
//! |---------------------|-------|
//! | `0`                 | Dawn  |
//! | `1..d`              | Day   |
//! | `d`                 | Dusk  |
//! | otherwise           | Night |
//!
//! Sunset may fall on a smaller hour than sunrise when it lands after local
//! midnight (high latitudes in summer); the day segment then wraps. When
//! sunrise and sunset share an hour, that hour is Dawn and the rest Night.
//!
//! Degenerate dates get a uniform phase.

use starfield_types::{Degeneracy, HOURS_PER_DAY, PhaseTag, SolarTimes};

/// One phase per hour, indexed by hour of day.
pub type PhaseTags = [PhaseTag; 24];

/// Lengths of the day and night ramps, in hours.
///
/// Transition hours (dawn, dusk) belong to neither segment, so
/// `daylight_hours + nighttime_hours + transition_hours == 24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLengths {
    /// Hours strictly between dawn and dusk.
    pub daylight_hours: u32,
    /// Hours strictly after dusk and before dawn, across midnight.
    pub nighttime_hours: u32,
}

/// Tag every hour of the day with its phase.
pub fn tag_phases(times: SolarTimes) -> PhaseTags {
    let mut tags = [PhaseTag::Night; 24];
    for (hour, tag) in (0..HOURS_PER_DAY).zip(tags.iter_mut()) {
        *tag = phase_at(times, hour);
    }
    tags
}

/// Phase for a single hour.
pub const fn phase_at(times: SolarTimes, hour: u32) -> PhaseTag {
    match times {
        SolarTimes::Degenerate(Degeneracy::PolarNight) => PhaseTag::Night,
        SolarTimes::Degenerate(Degeneracy::MidnightSun) => PhaseTag::Day,
        SolarTimes::Normal {
            sunrise_hour,
            sunset_hour,
        } => {
            let since_sunrise = hours_between(sunrise_hour, hour);
            let day_span = hours_between(sunrise_hour, sunset_hour);
            if since_sunrise == 0 {
                PhaseTag::Dawn
            } else if day_span == 0 {
                PhaseTag::Night
            } else if since_sunrise < day_span {
                PhaseTag::Day
            } else if since_sunrise == day_span {
                PhaseTag::Dusk
            } else {
                PhaseTag::Night
            }
        }
    }
}

/// Hours from `from` forward to `to` on the 24-hour clock, in `0..24`.
pub const fn hours_between(from: u32, to: u32) -> u32 {
    to.saturating_add(HOURS_PER_DAY).saturating_sub(from) % HOURS_PER_DAY
}

/// Day and night segment lengths for the given solar times.
///
/// Normal dates give one hour less than the sunrise-to-sunset span as
/// daylight, wrapping past midnight when sunset has the smaller hour, and
/// the rest of the day minus the two transition hours as night. When
/// sunrise and sunset share an hour there is a single transition hour and
/// no daylight.
pub const fn segment_lengths(times: SolarTimes) -> SegmentLengths {
    match times {
        SolarTimes::Degenerate(Degeneracy::MidnightSun) => SegmentLengths {
            daylight_hours: HOURS_PER_DAY,
            nighttime_hours: 0,
        },
        SolarTimes::Degenerate(Degeneracy::PolarNight) => SegmentLengths {
            daylight_hours: 0,
            nighttime_hours: HOURS_PER_DAY,
        },
        SolarTimes::Normal {
            sunrise_hour,
            sunset_hour,
        } => {
            let day_span = hours_between(sunrise_hour, sunset_hour);
            if day_span == 0 {
                SegmentLengths {
                    daylight_hours: 0,
                    nighttime_hours: HOURS_PER_DAY.saturating_sub(1),
                }
            } else {
                // day_span in 1..24, so the sum stays at 22.
                let daylight_hours = day_span.saturating_sub(1);
                SegmentLengths {
                    daylight_hours,
                    nighttime_hours: HOURS_PER_DAY.saturating_sub(daylight_hours).saturating_sub(2),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;

    fn count(tags: &PhaseTags, phase: PhaseTag) -> usize {
        tags.iter().filter(|&&t| t == phase).count()
    }

    #[test]
    fn six_to_eighteen() {
        let times = SolarTimes::normal(6, 18).unwrap();
        let tags = tag_phases(times);

        assert_eq!(tags[0], PhaseTag::Night);
        assert_eq!(tags[5], PhaseTag::Night);
        assert_eq!(tags[6], PhaseTag::Dawn);
        assert_eq!(tags[7], PhaseTag::Day);
        assert_eq!(tags[12], PhaseTag::Day);
        assert_eq!(tags[17], PhaseTag::Day);
        assert_eq!(tags[18], PhaseTag::Dusk);
        assert_eq!(tags[19], PhaseTag::Night);
        assert_eq!(tags[23], PhaseTag::Night);

        assert_eq!(
            segment_lengths(times),
            SegmentLengths {
                daylight_hours: 11,
                nighttime_hours: 11
            }
        );
    }

    #[test]
    fn exactly_one_dawn_and_one_dusk() {
        for sunrise in 0..24 {
            for sunset in (0..24).filter(|&sunset| sunset != sunrise) {
                let times = SolarTimes::normal(sunrise, sunset).unwrap();
                let tags = tag_phases(times);
                assert_eq!(count(&tags, PhaseTag::Dawn), 1);
                assert_eq!(count(&tags, PhaseTag::Dusk), 1);

                let lengths = segment_lengths(times);
                assert_eq!(lengths.daylight_hours + lengths.nighttime_hours + 2, 24);
                assert_eq!(count(&tags, PhaseTag::Day), lengths.daylight_hours as usize);
                assert_eq!(count(&tags, PhaseTag::Night), lengths.nighttime_hours as usize);
            }
        }
    }

    #[test]
    fn polar_night_is_all_night() {
        let tags = tag_phases(SolarTimes::polar_night());
        assert_eq!(count(&tags, PhaseTag::Night), 24);
        assert_eq!(
            segment_lengths(SolarTimes::polar_night()),
            SegmentLengths {
                daylight_hours: 0,
                nighttime_hours: 24
            }
        );
    }

    #[test]
    fn midnight_sun_is_all_day() {
        let tags = tag_phases(SolarTimes::midnight_sun());
        assert_eq!(count(&tags, PhaseTag::Day), 24);
        assert_eq!(
            segment_lengths(SolarTimes::midnight_sun()),
            SegmentLengths {
                daylight_hours: 24,
                nighttime_hours: 0
            }
        );
    }

    #[test]
    fn shared_sunrise_and_sunset_hour_is_dawn_only() {
        let times = SolarTimes::normal(11, 11).unwrap();
        let tags = tag_phases(times);
        assert_eq!(tags[11], PhaseTag::Dawn);
        assert_eq!(count(&tags, PhaseTag::Dawn), 1);
        assert_eq!(count(&tags, PhaseTag::Dusk), 0);
        assert_eq!(count(&tags, PhaseTag::Day), 0);
        assert_eq!(count(&tags, PhaseTag::Night), 23);
        assert_eq!(
            segment_lengths(times),
            SegmentLengths {
                daylight_hours: 0,
                nighttime_hours: 23
            }
        );
    }

    #[test]
    fn adjacent_sunrise_and_sunset_have_no_daylight() {
        let times = SolarTimes::normal(11, 12).unwrap();
        let tags = tag_phases(times);
        assert_eq!(tags[11], PhaseTag::Dawn);
        assert_eq!(tags[12], PhaseTag::Dusk);
        assert_eq!(
            segment_lengths(times),
            SegmentLengths {
                daylight_hours: 0,
                nighttime_hours: 22
            }
        );
    }

    #[test]
    fn sunset_after_midnight_wraps_the_day() {
        let times = SolarTimes::normal(2, 0).unwrap();
        let tags = tag_phases(times);

        assert_eq!(tags[2], PhaseTag::Dawn);
        assert_eq!(tags[0], PhaseTag::Dusk);
        assert_eq!(tags[1], PhaseTag::Night);
        assert!(tags[3..24].iter().all(|&t| t == PhaseTag::Day));
        assert_eq!(
            segment_lengths(times),
            SegmentLengths {
                daylight_hours: 21,
                nighttime_hours: 1
            }
        );
    }

    #[test]
    fn hours_between_wraps() {
        assert_eq!(hours_between(6, 18), 12);
        assert_eq!(hours_between(2, 0), 22);
        assert_eq!(hours_between(23, 1), 2);
        assert_eq!(hours_between(11, 11), 0);
    }
}
